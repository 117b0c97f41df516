//! Error types for the order actor.

use crate::address_actor::AddressError;
use crate::cart_actor::CartError;
use crate::catalog_actor::CatalogError;
use crate::error::AccessError;
use crate::model::{OrderStatus, ProductId};
use crate::payment::GatewayError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Unknown order, address or product, or one owned by another user.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Your cart is empty")]
    EmptyCart,

    /// Reservation failed for one of the lines. Nothing was taken.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The reserved lines do not add up to a representable total.
    #[error("Order total is too large to price")]
    AmountOutOfRange,

    /// Online payment submitted without a gateway transaction id.
    #[error("Online payment requires a payment reference")]
    PaymentRequired,

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("Payment gateway timed out after {0:?}")]
    GatewayTimeout(Duration),

    #[error("Cannot move an order from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    #[error("Orders are permanent records and cannot be deleted")]
    Immutable,

    #[error("Please log in to continue")]
    Unauthenticated,

    #[error("You do not have permission to do that")]
    Forbidden,

    #[error(transparent)]
    Catalog(CatalogError),

    #[error(transparent)]
    Cart(CartError),

    #[error(transparent)]
    Address(AddressError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<AccessError> for OrderError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::Unauthenticated => OrderError::Unauthenticated,
            AccessError::Forbidden => OrderError::Forbidden,
        }
    }
}

impl From<CatalogError> for OrderError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(id) => OrderError::NotFound(id),
            CatalogError::InsufficientStock {
                product_id,
                requested,
                available,
            } => OrderError::InsufficientStock {
                product_id,
                requested,
                available,
            },
            other => OrderError::Catalog(other),
        }
    }
}

impl From<AddressError> for OrderError {
    fn from(e: AddressError) -> Self {
        match e {
            AddressError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::Address(other),
        }
    }
}

impl From<CartError> for OrderError {
    fn from(e: CartError) -> Self {
        OrderError::Cart(e)
    }
}

impl From<GatewayError> for OrderError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Declined(reason) => OrderError::PaymentDeclined(reason),
            GatewayError::Unavailable(reason) => OrderError::GatewayUnavailable(reason),
            GatewayError::Timeout(limit) => OrderError::GatewayTimeout(limit),
        }
    }
}
