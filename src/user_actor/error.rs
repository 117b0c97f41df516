//! Error types for the user actor.

use crate::address_actor::AddressError;
use crate::cart_actor::CartError;
use crate::error::{AccessError, FieldErrors};
use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    /// Bad or already taken username/email, keyed by form field.
    #[error("{0}")]
    ValidationFailed(FieldErrors),

    #[error("Please log in to continue")]
    Unauthenticated,

    #[error("You do not have permission to do that")]
    Forbidden,

    /// The account's cart could not be dropped.
    #[error(transparent)]
    Cart(CartError),

    /// The account's address book could not be dropped.
    #[error(transparent)]
    Address(AddressError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<AccessError> for UserError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::Unauthenticated => UserError::Unauthenticated,
            AccessError::Forbidden => UserError::Forbidden,
        }
    }
}

impl From<FieldErrors> for UserError {
    fn from(errors: FieldErrors) -> Self {
        UserError::ValidationFailed(errors)
    }
}

impl From<CartError> for UserError {
    fn from(e: CartError) -> Self {
        UserError::Cart(e)
    }
}

impl From<AddressError> for UserError {
    fn from(e: AddressError) -> Self {
        UserError::Address(e)
    }
}
