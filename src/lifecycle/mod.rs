//! # System Lifecycle
//!
//! Starting, wiring and stopping the storefront's actors.
//!
//! Actors are created first and started second. Each factory returns an actor
//! and its client without dependencies; [`StoreSystem::new`] then spawns every
//! actor with its context, which is built from the other actors' clients:
//!
//! ```text
//! catalog   ()
//! addresses IdSequence
//! carts     CatalogClient + IdSequence
//! users     CartClient
//! orders    CartClient + CatalogClient + AddressClient + gateway + config
//! ```
//!
//! The graph has no cycles, so shutdown is just dropping the clients and
//! waiting for the tasks.

pub mod store_system;
pub mod tracing;

pub use store_system::StoreSystem;
