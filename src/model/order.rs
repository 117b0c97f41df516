//! Orders and their status machine.
//!
//! An order is written once by the order engine. Afterwards only `status` and
//! `updated_at` change; item prices are the values captured while stock was
//! reserved and are never recomputed.

use crate::model::{line_amount, AddressId, OrderId, ProductId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "COD")]
    Cod,
    Online,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cod => f.write_str("COD"),
            PaymentMethod::Online => f.write_str("Online"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Initial status for a freshly placed order.
    pub fn initial_for(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Online => OrderStatus::Confirmed,
            PaymentMethod::Cod => OrderStatus::Pending,
        }
    }

    /// `Pending -> Confirmed -> Shipped -> Delivered`, and `Cancelled` from
    /// `Pending` or `Confirmed`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Shipped)
                | (Shipped, Delivered)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

/// One purchased line with its frozen unit price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl OrderItem {
    pub fn line_total(&self) -> Option<Decimal> {
        line_amount(self.price, self.quantity)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub address_id: AddressId,
    pub payment_method: PaymentMethod,
    pub total_price: Decimal,
    pub payment_ref: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub delivery_date: NaiveDate,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// Payload for placing an order from the user's cart.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub user_id: UserId,
    pub address_id: AddressId,
    pub payment_method: PaymentMethod,
    /// Gateway transaction id submitted by the checkout page.
    pub payment_ref: Option<String>,
}

impl Order {
    /// An empty order shell; the engine fills totals and items before it is stored.
    pub fn new(id: OrderId, params: PlaceOrder) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id: params.user_id,
            address_id: params.address_id,
            payment_method: params.payment_method,
            total_price: Decimal::ZERO,
            payment_ref: params.payment_ref,
            status: OrderStatus::initial_for(params.payment_method),
            created_at: now,
            delivery_date: now.date_naive(),
            updated_at: now,
            items: Vec::new(),
        }
    }

    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }
}
