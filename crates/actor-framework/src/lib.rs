//! # Actor Framework
//!
//! Building blocks for type-safe, concurrent actor systems. The crate follows a
//! **Resource-Oriented Architecture (ROA)** on top of the **Actor Model**: every
//! resource type owns one actor, and that actor is the only code that ever
//! touches the resource's state.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - domain models and their rules
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and staged writes
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed requests
//!
//! Business logic is written once in the entity trait. The actor takes care of
//! the mailbox, ID allocation, rollback of failed hooks and logging.
//!
//! ## Requests
//!
//! Beyond CRUD and single-entity actions the actor understands:
//!
//! - `ensure`: create-if-absent under a caller-chosen ID
//! - `list`: filtered scan of the whole store
//! - `perform_batch`: several actions committed all-or-nothing
//!
//! ## Defining an Entity
//!
//! ```rust,ignore
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Shelf { id: u32, units: u32 }
//!
//! #[derive(Debug)] struct ShelfCreate { units: u32 }
//! #[derive(Debug)] enum ShelfAction { Take(u32) }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("not enough units")]
//! struct ShelfError;
//!
//! #[async_trait]
//! impl ActorEntity for Shelf {
//!     type Id = u32;
//!     type Create = ShelfCreate;
//!     type Update = ();
//!     type Action = ShelfAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = ShelfError;
//!
//!     fn from_create_params(id: u32, p: ShelfCreate) -> Result<Self, ShelfError> {
//!         Ok(Self { id, units: p.units })
//!     }
//!
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), ShelfError> { Ok(()) }
//!
//!     async fn handle_action(&mut self, a: ShelfAction, _: &()) -> Result<u32, ShelfError> {
//!         let ShelfAction::Take(n) = a;
//!         self.units = self.units.checked_sub(n).ok_or(ShelfError)?;
//!         Ok(self.units)
//!     }
//! }
//!
//! let (actor, client) = ResourceActor::<Shelf>::new(10);
//! tokio::spawn(actor.run(()));
//! let id = client.create(ShelfCreate { units: 3 }).await?;
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are passed to `run()`, not `new()`. All actors are constructed
//! first, then each one is started with the clients it needs:
//!
//! ```rust,ignore
//! let (catalog_actor, catalog) = ResourceActor::<Product>::new(32);
//! let (cart_actor, carts) = ResourceActor::<Cart>::new(32);
//! tokio::spawn(catalog_actor.run(()));
//! tokio::spawn(cart_actor.run(CartContext::new(CatalogClient::new(catalog))));
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor
//! - Multiple actors run in **parallel**
//! - No shared mutable state (message passing only)
//!
//! ## Testing
//!
//! [`mock::MockClient`] hands out a real `ResourceClient<T>` answered from a
//! queue of scripted responses, so an actor can be tested against mocked
//! dependencies without spawning them.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Predicate, ResourceRequest, Response};
