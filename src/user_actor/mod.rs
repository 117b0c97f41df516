//! # User Actor
//!
//! Registered accounts. Usernames and emails are unique across the store; the
//! actor enforces that on every create and profile edit.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`User`]
//! - [`error`] - [`UserError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! Deleting an account drops its cart and its address book, so the actor runs
//! with a [`UserContext`]:
//!
//! ```rust,ignore
//! let (user_actor, users) = user_actor::new(32);
//! tokio::spawn(user_actor.run(UserContext {
//!     carts: carts.clone(),
//!     addresses: addresses.clone(),
//! }));
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{AddressClient, CartClient, UserClient};
use crate::model::User;
use actor_framework::ResourceActor;

/// Dependencies of the user actor.
#[derive(Clone)]
pub struct UserContext {
    pub carts: CartClient,
    pub addresses: AddressClient,
}

/// Creates a new user actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, UserClient::new(generic_client))
}
