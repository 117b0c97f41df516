//! # Payment Gateway
//!
//! The core's contract with an external payment provider. Checkout asks the
//! gateway for a payment intent sized to the cart total; the order engine asks
//! it to confirm a submitted transaction before an online order is accepted.
//!
//! Provider specifics stay behind [`PaymentGateway`]. The store ships
//! [`InMemoryGateway`] for tests and the demo binary.

pub mod memory;

pub use memory::InMemoryGateway;

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// A provider-side order the customer pays against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentIntent {
    pub intent_id: String,
    pub amount_minor: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The provider answered and refused the payment.
    #[error("Payment declined: {0}")]
    Declined(String),

    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),

    #[error("Payment gateway timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens a payment for `amount_minor` units (paise for INR).
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, GatewayError>;

    /// Confirms that `reference` is a captured payment of exactly this amount.
    async fn verify_payment(
        &self,
        reference: &str,
        amount_minor: i64,
        currency: &str,
    ) -> Result<(), GatewayError>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}

/// Converts a decimal amount to minor units, dropping any fraction of a
/// minor unit. `None` when it does not fit in an `i64`.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount.checked_mul(Decimal::ONE_HUNDRED)?.trunc().to_i64()
}

/// Bounds a gateway call by `limit`.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| GatewayError::Timeout(limit))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_units_truncate() {
        assert_eq!(to_minor_units(Decimal::from(210)), Some(21_000));
        assert_eq!(to_minor_units(Decimal::new(19_999, 2)), Some(19_999));
        assert_eq!(to_minor_units(Decimal::new(10_005, 3)), Some(1_000));
        assert_eq!(to_minor_units(Decimal::MAX), None);
    }

    #[tokio::test]
    async fn slow_call_times_out() {
        let result: Result<(), _> = with_timeout(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert_eq!(result, Err(GatewayError::Timeout(Duration::from_millis(10))));
    }
}
