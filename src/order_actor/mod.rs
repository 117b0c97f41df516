//! # Order Actor
//!
//! The order engine. Creating an order is the checkout transaction: the
//! actor's `on_create` hook reads the cart, reserves stock, settles payment,
//! freezes prices and clears the cart, compensating earlier steps when a later
//! one fails. The order is stored only if every step succeeded.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The actor is started with an [`OrderContext`] holding the cart, catalog and
//! address clients, the payment gateway and the store configuration:
//!
//! ```rust,ignore
//! let (order_actor, orders) = order_actor::new(32);
//! tokio::spawn(order_actor.run(OrderContext {
//!     carts, catalog, addresses,
//!     gateway: Arc::new(InMemoryGateway::new()),
//!     config: Arc::new(StoreConfig::default()),
//! }));
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{AddressClient, CartClient, CatalogClient, OrderClient};
use crate::config::StoreConfig;
use crate::model::Order;
use crate::payment::PaymentGateway;
use actor_framework::ResourceActor;
use std::sync::Arc;

/// Dependencies of the order actor.
#[derive(Clone)]
pub struct OrderContext {
    pub carts: CartClient,
    pub catalog: CatalogClient,
    pub addresses: AddressClient,
    pub gateway: Arc<dyn PaymentGateway>,
    pub config: Arc<StoreConfig>,
}

/// Creates a new order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
