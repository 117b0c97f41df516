//! Error types for the address book actor.

use crate::error::{AccessError, FieldErrors};
use crate::model::AddressId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AddressError {
    /// Unknown address, or one owned by another user.
    #[error("Address not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    ValidationFailed(FieldErrors),

    /// Orders still ship to this address.
    #[error("Address {0} is used by existing orders and cannot be deleted")]
    Protected(AddressId),

    #[error("Please log in to continue")]
    Unauthenticated,

    #[error("You do not have permission to do that")]
    Forbidden,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<AccessError> for AddressError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::Unauthenticated => AddressError::Unauthenticated,
            AccessError::Forbidden => AddressError::Forbidden,
        }
    }
}

impl From<FieldErrors> for AddressError {
    fn from(errors: FieldErrors) -> Self {
        AddressError::ValidationFailed(errors)
    }
}
