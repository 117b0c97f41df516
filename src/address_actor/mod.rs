//! # Address Book Actor
//!
//! One [`AddressBook`] per user, holding every shipping address of that user.
//! Started with the [`IdSequence`](crate::model::IdSequence) that numbers
//! addresses across all books.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::AddressClient;
use crate::model::AddressBook;
use actor_framework::ResourceActor;

/// Creates a new address book actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<AddressBook>, AddressClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, AddressClient::new(generic_client))
}
