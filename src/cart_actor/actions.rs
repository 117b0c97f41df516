//! Custom actions for the cart actor.

use crate::model::{CartItem, CartItemId, CartSummary, ProductId};

#[derive(Debug, Clone)]
pub enum CartAction {
    /// One more unit of a product: bumps the existing line or starts a new one.
    Add(ProductId),
    Increment(CartItemId),
    /// Removes the line when it would drop below one.
    Decrement(CartItemId),
    Remove(CartItemId),
    Clear,
    /// Takes the given lines' quantities out of the cart after checkout.
    /// Lines added or topped up since the order's snapshot stay behind.
    RemovePurchased(Vec<CartItem>),
    /// "Buy now": empties the cart and leaves a single unit of the product.
    ReplaceWithSingle(ProductId),
    /// Prices the cart against the live catalog, dropping lines whose product
    /// no longer exists.
    Summary,
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone)]
pub enum CartActionResult {
    Add(CartItem),
    Increment(CartItem),
    Decrement(Option<CartItem>),
    Remove(()),
    Clear(()),
    RemovePurchased(()),
    ReplaceWithSingle(CartItem),
    Summary(CartSummary),
}
