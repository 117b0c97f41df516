//! In-process gateway.
//!
//! Records intents and "captured" payments in memory. Tests drive it directly:
//! `capture` plays the customer completing a payment, `set_unavailable` and
//! `with_delay` simulate an outage or a slow provider.

use super::{GatewayError, PaymentGateway, PaymentIntent};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Default)]
struct GatewayState {
    next_intent: u32,
    intents: Vec<PaymentIntent>,
    captured: HashMap<String, (i64, String)>,
    unavailable: bool,
}

#[derive(Debug, Default)]
pub struct InMemoryGateway {
    state: Mutex<GatewayState>,
    delay: Option<Duration>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps for `delay` before answering.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    fn state(&self) -> MutexGuard<'_, GatewayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks `reference` as a completed payment of `amount_minor`.
    pub fn capture(&self, reference: impl Into<String>, amount_minor: i64, currency: &str) {
        self.state()
            .captured
            .insert(reference.into(), (amount_minor, currency.to_string()));
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.state().unavailable = unavailable;
    }

    pub fn intents(&self) -> Vec<PaymentIntent> {
        self.state().intents.clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn ensure_available(&self) -> Result<(), GatewayError> {
        if self.state().unavailable {
            return Err(GatewayError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for InMemoryGateway {
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, GatewayError> {
        self.pause().await;
        self.ensure_available()?;
        let mut state = self.state();
        state.next_intent += 1;
        let intent = PaymentIntent {
            intent_id: format!("order_mem_{:06}", state.next_intent),
            amount_minor,
            currency: currency.to_string(),
        };
        state.intents.push(intent.clone());
        debug!(intent_id = %intent.intent_id, amount_minor, currency, "Payment intent created");
        Ok(intent)
    }

    async fn verify_payment(
        &self,
        reference: &str,
        amount_minor: i64,
        currency: &str,
    ) -> Result<(), GatewayError> {
        self.pause().await;
        self.ensure_available()?;
        let state = self.state();
        match state.captured.get(reference) {
            None => Err(GatewayError::Declined(format!(
                "unknown payment reference {reference}"
            ))),
            Some((paid, paid_currency)) if *paid != amount_minor || paid_currency != currency => {
                Err(GatewayError::Declined(format!(
                    "paid {paid} {paid_currency}, expected {amount_minor} {currency}"
                )))
            }
            Some(_) => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captured_payment_verifies_for_exact_amount() {
        let gateway = InMemoryGateway::new();
        gateway.capture("pay_1", 21_000, "INR");

        assert!(gateway.verify_payment("pay_1", 21_000, "INR").await.is_ok());
        assert!(matches!(
            gateway.verify_payment("pay_1", 20_000, "INR").await,
            Err(GatewayError::Declined(_))
        ));
        assert!(matches!(
            gateway.verify_payment("pay_2", 21_000, "INR").await,
            Err(GatewayError::Declined(_))
        ));
    }

    #[tokio::test]
    async fn outage_is_reported() {
        let gateway = InMemoryGateway::new();
        gateway.set_unavailable(true);
        assert!(matches!(
            gateway.create_payment_intent(100, "INR").await,
            Err(GatewayError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn intents_are_numbered() {
        let gateway = InMemoryGateway::new();
        let first = gateway.create_payment_intent(100, "INR").await.unwrap();
        let second = gateway.create_payment_intent(250, "INR").await.unwrap();
        assert_ne!(first.intent_id, second.intent_id);
        assert_eq!(gateway.intents().len(), 2);
    }
}
