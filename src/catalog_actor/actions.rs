//! Custom actions for the catalog actor.
//!
//! Stock moves only through these actions. The order engine sends `Reserve`
//! for every cart line in one batch, so a checkout either takes all of its
//! units or none of them.

use crate::model::ProductId;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub enum CatalogAction {
    /// Reads the stock level without modifying it.
    CheckStock,
    /// Adds `delta` (may be negative) to stock. Fails if the result would be
    /// below zero.
    AdjustStock(i64),
    /// Takes `quantity` units for an order and pins the product against
    /// deletion. Captures the effective unit price in the same step.
    Reserve(u32),
    /// Undoes a `Reserve` of `quantity` units.
    Release(u32),
}

/// Results from CatalogActions - variants match 1:1 with CatalogAction
#[derive(Debug, Clone)]
pub enum CatalogActionResult {
    CheckStock(u32),
    AdjustStock(u32),
    Reserve(ReservedLine),
    Release(u32),
}

/// Units taken for an order line, priced at the moment they were taken.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservedLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}
