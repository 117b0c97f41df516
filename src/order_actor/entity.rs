//! ActorEntity trait implementation for the Order domain type.
//!
//! [`Order::on_create`] is the order engine. Steps, in order:
//!
//! 1. Snapshot the user's cart (`EmptyCart` if there is nothing in it).
//! 2. Pin the shipping address, which also proves the user owns it.
//! 3. Reserve stock for every line in one catalog batch. The batch captures
//!    each line's effective price in the same step that takes the units.
//! 4. Total the reserved lines.
//! 5. Online only: require a payment reference and have the gateway confirm
//!    it for that total, bounded by the configured timeout.
//! 6. Fill in the order: items with frozen prices, total, delivery date.
//! 7. Take the purchased lines out of the cart.
//!
//! A failure after step 2 releases the address; after step 3 it also returns
//! the stock. The actor stores the order only when the hook succeeds, so a
//! failed checkout leaves no order behind.

use super::error::OrderError;
use super::OrderContext;
use crate::catalog_actor::ReservedLine;
use crate::model::{
    line_amount, Order, OrderId, OrderItem, OrderStatus, PaymentMethod, PlaceOrder, ProductId,
};
use crate::payment::{to_minor_units, with_timeout};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

impl Order {
    async fn settle_payment(&self, total: Decimal, ctx: &OrderContext) -> Result<(), OrderError> {
        if self.payment_method != PaymentMethod::Online {
            return Ok(());
        }
        let reference = self
            .payment_ref
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .ok_or(OrderError::PaymentRequired)?;
        if !ctx.config.payment.verify_online_payments {
            return Ok(());
        }

        let amount_minor = to_minor_units(total)
            .ok_or_else(|| OrderError::PaymentDeclined(format!("amount {total} out of range")))?;
        let currency = &ctx.config.checkout.currency;
        with_timeout(
            ctx.config.gateway_timeout(),
            ctx.gateway.verify_payment(reference, amount_minor, currency),
        )
        .await?;
        info!(order_id = %self.id, gateway = ctx.gateway.name(), amount_minor, "Payment verified");
        Ok(())
    }

    /// Undoes the address pin and, when given, the stock reservation.
    async fn compensate(&self, ctx: &OrderContext, reserved: Option<&[(ProductId, u32)]>) {
        if let Some(lines) = reserved {
            if let Err(e) = ctx.catalog.release(lines).await {
                warn!(order_id = %self.id, error = %e, "Failed to release reserved stock");
            }
        }
        if let Err(e) = ctx.addresses.release(self.user_id, self.address_id).await {
            warn!(order_id = %self.id, error = %e, "Failed to release address");
        }
    }

    fn fill(&mut self, reserved: Vec<ReservedLine>, total: Decimal, delivery_days: u32) {
        self.items = reserved
            .into_iter()
            .map(|line| OrderItem {
                product_id: line.product_id,
                product_name: line.name,
                quantity: line.quantity,
                price: line.unit_price,
            })
            .collect();
        self.total_price = total;
        self.delivery_date = self
            .created_at
            .date_naive()
            .checked_add_days(Days::new(u64::from(delivery_days)))
            .unwrap_or(NaiveDate::MAX);
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = PlaceOrder;
    type Update = OrderStatus;
    type Action = ();
    type ActionResult = ();
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: PlaceOrder) -> Result<Self, Self::Error> {
        Ok(Order::new(id, params))
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        let cart = ctx
            .carts
            .snapshot(self.user_id)
            .await?
            .filter(|cart| !cart.is_empty())
            .ok_or(OrderError::EmptyCart)?;
        let lines = cart.quantities();
        let bought = cart.items;

        ctx.addresses
            .reference(self.user_id, self.address_id)
            .await?;

        let reserved = match ctx.catalog.reserve(&lines).await {
            Ok(reserved) => reserved,
            Err(e) => {
                self.compensate(ctx, None).await;
                return Err(e.into());
            }
        };
        let total = reserved.iter().try_fold(Decimal::ZERO, |acc, line| {
            line_amount(line.unit_price, line.quantity).and_then(|amount| acc.checked_add(amount))
        });
        let Some(total) = total else {
            warn!(order_id = %self.id, "Order total out of range, rolling back");
            self.compensate(ctx, Some(lines.as_slice())).await;
            return Err(OrderError::AmountOutOfRange);
        };

        if let Err(e) = self.settle_payment(total, ctx).await {
            warn!(order_id = %self.id, error = %e, "Payment not settled, rolling back");
            self.compensate(ctx, Some(lines.as_slice())).await;
            return Err(e);
        }

        self.fill(reserved, total, ctx.config.checkout.delivery_days);

        if let Err(e) = ctx.carts.remove_purchased(self.user_id, bought).await {
            self.compensate(ctx, Some(lines.as_slice())).await;
            return Err(e.into());
        }

        info!(
            order_id = %self.id,
            user_id = %self.user_id,
            total = %self.total_price,
            status = %self.status,
            lines = self.items.len(),
            "Order placed"
        );
        Ok(())
    }

    async fn on_update(&mut self, status: OrderStatus, _ctx: &OrderContext) -> Result<(), Self::Error> {
        if !self.status.can_transition_to(status) {
            return Err(OrderError::InvalidStatusTransition {
                from: self.status,
                to: status,
            });
        }
        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn on_delete(&self, _ctx: &OrderContext) -> Result<(), Self::Error> {
        Err(OrderError::Immutable)
    }

    async fn handle_action(&mut self, _action: (), _ctx: &OrderContext) -> Result<(), Self::Error> {
        Ok(())
    }
}
