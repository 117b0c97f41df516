//! Error types for the catalog actor.

use crate::error::{AccessError, FieldErrors};
use crate::model::ProductId;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The stock change would leave a negative count.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The stock change would push the count past what can be stored.
    #[error("Stock for {product_id} cannot grow by {delta} from {stock}")]
    StockOverflow {
        product_id: ProductId,
        stock: u32,
        delta: i64,
    },

    #[error("{0}")]
    ValidationFailed(FieldErrors),

    /// Order items still reference the product.
    #[error("Product {0} is referenced by existing orders and cannot be deleted")]
    Protected(ProductId),

    #[error("Please log in to continue")]
    Unauthenticated,

    #[error("You do not have permission to do that")]
    Forbidden,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<AccessError> for CatalogError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::Unauthenticated => CatalogError::Unauthenticated,
            AccessError::Forbidden => CatalogError::Forbidden,
        }
    }
}

impl From<FieldErrors> for CatalogError {
    fn from(errors: FieldErrors) -> Self {
        CatalogError::ValidationFailed(errors)
    }
}
