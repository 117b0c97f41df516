//! # Catalog Actor
//!
//! Products, prices and stock.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`CatalogError`]
//! - [`actions`] - [`CatalogAction`] and [`CatalogActionResult`] for stock movements
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, catalog) = catalog_actor::new(32);
//! tokio::spawn(actor.run(()));
//!
//! let id = catalog.create_product(&staff, ProductCreate::new(..)).await?;
//! catalog.adjust_stock(id, -2).await?;
//! ```
//!
//! The catalog has no dependencies (Context = ()).

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CatalogClient;
use crate::model::Product;
use actor_framework::ResourceActor;

/// Creates a new catalog actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, CatalogClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CatalogClient::new(generic_client))
}
