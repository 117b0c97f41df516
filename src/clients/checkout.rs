//! # Checkout
//!
//! Builds what the checkout page shows before an order is placed: the priced
//! cart, the shopper's addresses and, for a payable total, a payment intent the
//! page hands to the gateway widget.
use crate::clients::{AddressClient, CartClient};
use crate::config::StoreConfig;
use crate::model::{Address, CartSummary};
use crate::order_actor::OrderError;
use crate::payment::{to_minor_units, with_timeout, PaymentGateway, PaymentIntent};
use crate::session::Session;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutView {
    pub summary: CartSummary,
    pub item_count: u32,
    pub total: Decimal,
    pub addresses: Vec<Address>,
    pub default_address: Option<Address>,
    /// Gateway public key for the payment widget.
    pub key_id: String,
    pub currency: String,
    /// Absent when there is nothing to charge.
    pub payment_intent: Option<PaymentIntent>,
}

#[derive(Clone)]
pub struct CheckoutService {
    carts: CartClient,
    addresses: AddressClient,
    gateway: Arc<dyn PaymentGateway>,
    config: Arc<StoreConfig>,
}

impl CheckoutService {
    pub fn new(
        carts: CartClient,
        addresses: AddressClient,
        gateway: Arc<dyn PaymentGateway>,
        config: Arc<StoreConfig>,
    ) -> Self {
        Self {
            carts,
            addresses,
            gateway,
            config,
        }
    }

    #[instrument(skip(self, session))]
    pub async fn prepare(&self, session: &Session) -> Result<CheckoutView, OrderError> {
        let user = session.require_user()?;
        let summary = self.carts.summary_for(user).await?;
        if summary.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let addresses = self.addresses.addresses_of(user).await?;
        let default_address = addresses.iter().find(|a| a.is_default).cloned();
        let currency = self.config.checkout.currency.clone();

        let payment_intent = if summary.total > Decimal::ZERO {
            let amount_minor = to_minor_units(summary.total).ok_or_else(|| {
                OrderError::PaymentDeclined(format!("amount {} out of range", summary.total))
            })?;
            let intent = with_timeout(
                self.config.gateway_timeout(),
                self.gateway.create_payment_intent(amount_minor, &currency),
            )
            .await?;
            info!(%user, intent_id = %intent.intent_id, amount_minor, "Payment intent created");
            Some(intent)
        } else {
            None
        };

        Ok(CheckoutView {
            item_count: summary.item_count(),
            total: summary.total,
            summary,
            addresses,
            default_address,
            key_id: self.config.payment.key_id.clone(),
            currency,
            payment_intent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_actor::CartActionResult;
    use crate::model::{AddressBook, Cart, CartItemId, CartLine, ProductId, UserId};
    use crate::payment::InMemoryGateway;
    use actor_framework::mock::MockClient;
    use actor_framework::FrameworkError;

    fn service(
        carts: &MockClient<Cart>,
        books: &MockClient<AddressBook>,
        gateway: Arc<InMemoryGateway>,
    ) -> CheckoutService {
        CheckoutService::new(
            CartClient::new(carts.client()),
            AddressClient::new(books.client()),
            gateway,
            Arc::new(StoreConfig::default()),
        )
    }

    fn summary(price: i64, quantity: u32) -> CartSummary {
        let unit_price = Decimal::from(price);
        CartSummary::from_lines(vec![CartLine {
            item_id: CartItemId(1),
            product_id: ProductId(1),
            name: "Smart Bulb".into(),
            unit_price,
            quantity,
            line_total: unit_price * Decimal::from(quantity),
        }])
        .unwrap()
    }

    #[tokio::test]
    async fn test_nothing_to_buy() {
        let mut carts = MockClient::<Cart>::new();
        carts
            .expect_action(UserId(1))
            .return_err(FrameworkError::NotFound(UserId(1).to_string()));
        let books = MockClient::<AddressBook>::new();

        let checkout = service(&carts, &books, Arc::new(InMemoryGateway::new()));
        let err = checkout.prepare(&Session::customer(UserId(1))).await.unwrap_err();
        assert_eq!(err, OrderError::EmptyCart);
        carts.verify();
        books.verify();
    }

    #[tokio::test]
    async fn test_intent_matches_total() {
        let mut carts = MockClient::<Cart>::new();
        carts
            .expect_action(UserId(1))
            .return_ok(CartActionResult::Summary(summary(80, 2)));
        let mut books = MockClient::<AddressBook>::new();
        books.expect_get(UserId(1)).return_ok(None);
        let gateway = Arc::new(InMemoryGateway::new());

        let checkout = service(&carts, &books, gateway.clone());
        let view = checkout.prepare(&Session::customer(UserId(1))).await.unwrap();

        assert_eq!(view.total, Decimal::from(160));
        assert_eq!(view.item_count, 2);
        assert!(view.addresses.is_empty());
        assert_eq!(view.currency, "INR");
        let intent = view.payment_intent.unwrap();
        assert_eq!(intent.amount_minor, 16_000);
        assert_eq!(gateway.intents().len(), 1);
        carts.verify();
        books.verify();
    }

    #[tokio::test]
    async fn test_free_cart_has_no_intent() {
        let mut carts = MockClient::<Cart>::new();
        carts
            .expect_action(UserId(1))
            .return_ok(CartActionResult::Summary(summary(0, 1)));
        let mut books = MockClient::<AddressBook>::new();
        books.expect_get(UserId(1)).return_ok(None);
        let gateway = Arc::new(InMemoryGateway::new());

        let checkout = service(&carts, &books, gateway.clone());
        let view = checkout.prepare(&Session::customer(UserId(1))).await.unwrap();
        assert!(view.payment_intent.is_none());
        assert!(gateway.intents().is_empty());
    }

    #[tokio::test]
    async fn test_gateway_outage_surfaces() {
        let mut carts = MockClient::<Cart>::new();
        carts
            .expect_action(UserId(1))
            .return_ok(CartActionResult::Summary(summary(50, 1)));
        let mut books = MockClient::<AddressBook>::new();
        books.expect_get(UserId(1)).return_ok(None);
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.set_unavailable(true);

        let checkout = service(&carts, &books, gateway);
        let err = checkout.prepare(&Session::customer(UserId(1))).await.unwrap_err();
        assert!(matches!(err, OrderError::GatewayUnavailable(_)));
    }
}
