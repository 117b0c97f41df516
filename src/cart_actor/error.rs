//! Error types for the cart actor.

use crate::catalog_actor::CatalogError;
use crate::error::AccessError;
use crate::model::ProductId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// Unknown cart line or product.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0} is out of stock")]
    OutOfStock(ProductId),

    /// The line already holds every unit in stock.
    #[error("Stock limit reached for {product_id}: only {stock} available")]
    StockLimitReached { product_id: ProductId, stock: u32 },

    /// A line or the cart total does not fit a money amount.
    #[error("Cart total is too large to price")]
    AmountOutOfRange,

    #[error("Please log in to continue")]
    Unauthenticated,

    #[error("You do not have permission to do that")]
    Forbidden,

    #[error(transparent)]
    Catalog(CatalogError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<AccessError> for CartError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::Unauthenticated => CartError::Unauthenticated,
            AccessError::Forbidden => CartError::Forbidden,
        }
    }
}

impl From<CatalogError> for CartError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(id) => CartError::NotFound(id),
            other => CartError::Catalog(other),
        }
    }
}
