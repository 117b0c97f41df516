//! # Cart Actor
//!
//! One cart per user, keyed by `UserId`. Carts consult the catalog for stock
//! and live prices, so the actor is started with a [`CartContext`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Cart`]
//! - [`error`] - [`CartError`]
//! - [`actions`] - [`CartAction`] and [`CartActionResult`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{CartClient, CatalogClient};
use crate::model::{Cart, IdSequence};
use actor_framework::ResourceActor;

/// Dependencies of the cart actor.
#[derive(Clone)]
pub struct CartContext {
    pub catalog: CatalogClient,
    /// Source of cart line IDs, shared by every cart.
    pub line_ids: IdSequence,
}

impl CartContext {
    pub fn new(catalog: CatalogClient, line_ids: IdSequence) -> Self {
        Self { catalog, line_ids }
    }
}

/// Creates a new cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CartClient::new(generic_client))
}
