//! # ActorEntity Trait
//!
//! The contract every storefront resource (Product, Cart, AddressBook, Order,
//! User) implements to be managed by the generic [`ResourceActor`](crate::ResourceActor).
//!
//! Associated types pin each resource to its own payloads: a `Cart` only accepts
//! `CartAction`s, a `Product` only `ProductCreate` payloads, and so on. The
//! compiler rejects a mismatched request before it can reach an actor.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::conflicts_with`]
//!
//! The defaults accept everything.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are `async` so an entity can consult other actors (a cart asks the
/// catalog for stock, an order reserves stock and pins an address). Those
/// dependencies arrive through `Context`, which is handed to `run()` rather than
/// `new()` so actors can be wired after they are all constructed.
///
/// # Atomicity
/// The actor snapshots the entity before every mutating hook and restores the
/// snapshot when the hook fails, so a failed request never leaves partial
/// state behind. Side effects a hook performs on *other* actors are not covered
/// and must be compensated by the hook itself.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation; ordered so
    /// listings come back in a stable order.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `Reserve`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per actor. Every hook reports through it, which keeps
    /// client code to a single `match`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction, before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed. Returning an error
    /// keeps the entity in the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    // --- Store Constraints ---

    /// Checked against every other stored entity after a create or update.
    /// Return an error to reject the write (e.g. a duplicate email).
    fn conflicts_with(&self, _other: &Self) -> Option<Self::Error> {
        None
    }
}
