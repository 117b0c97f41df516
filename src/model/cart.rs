//! Shopping cart.
//!
//! One `Cart` per user, keyed by the user's ID and created lazily by the first
//! add. Lines store only product and quantity; prices are read live from the
//! catalog whenever the cart is summarised.

use crate::model::{CartItemId, ProductId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Cart {
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload. The cart's ID is the owner's `UserId`.
#[derive(Debug, Clone, Default)]
pub struct CartCreate;

impl Cart {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub(crate) fn item_mut(&mut self, id: CartItemId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub(crate) fn item_for_product_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id == product_id)
    }

    /// `(product, quantity)` pairs in line order.
    pub fn quantities(&self) -> Vec<(ProductId, u32)> {
        self.items
            .iter()
            .map(|item| (item.product_id, item.quantity))
            .collect()
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A cart line priced against the live catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub item_id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// What the cart page shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
}

/// `unit_price * quantity`, or `None` when the amount does not fit a `Decimal`.
pub fn line_amount(unit_price: Decimal, quantity: u32) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}

impl CartSummary {
    /// Totals the lines. `None` when the sum does not fit a `Decimal`.
    pub fn from_lines(lines: Vec<CartLine>) -> Option<Self> {
        let total = lines
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.line_total))?;
        Some(Self { lines, total })
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across every line.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }
}
