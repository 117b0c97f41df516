//! A product in the catalog.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
//!
//! See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
//! - Creation parameters ([`ProductCreate`])
//! - Update parameters ([`ProductUpdate`])
//! - Custom actions ([`CatalogAction`](crate::catalog_actor::CatalogAction))

use crate::error::FieldErrors;
use crate::model::ProductId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Lighting,
    Actuators,
    #[serde(rename = "Touch Switches")]
    TouchSwitches,
    Security,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Lighting,
        Category::Actuators,
        Category::TouchSwitches,
        Category::Security,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Lighting => "Lighting",
            Category::Actuators => "Actuators",
            Category::TouchSwitches => "Touch Switches",
            Category::Security => "Security",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub warranty: Option<String>,
    pub price: Decimal,
    pub offer_price: Option<Decimal>,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
    /// Order items pointing at this product. Non-zero blocks deletion.
    pub order_refs: u32,
}

impl Product {
    /// Offer price when set, list price otherwise.
    pub fn effective_price(&self) -> Decimal {
        self.offer_price.unwrap_or(self.price)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub warranty: Option<String>,
    pub price: Decimal,
    pub offer_price: Option<Decimal>,
    pub stock: u32,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, category: Category, price: Decimal, stock: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category,
            warranty: None,
            price,
            offer_price: None,
            stock,
        }
    }

    pub fn with_offer(mut self, offer_price: Decimal) -> Self {
        self.offer_price = Some(offer_price);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_warranty(mut self, warranty: impl Into<String>) -> Self {
        self.warranty = Some(warranty.into());
        self
    }
}

/// Partial update. `None` leaves a field alone; the nested options of
/// `warranty` and `offer_price` allow clearing them.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub warranty: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub offer_price: Option<Option<Decimal>>,
    pub stock: Option<u32>,
}

/// Listing order for the product grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

/// Prices hold at most ten digits, two of them after the decimal point.
const PRICE_DECIMAL_PLACES: u32 = 2;
const PRICE_INTEGER_DIGITS: u32 = 8;

fn check_price(errors: &mut FieldErrors, field: &str, label: &str, value: Decimal) {
    if value.is_sign_negative() {
        errors.add(field, format!("{label} cannot be negative."));
    } else if value.normalize().scale() > PRICE_DECIMAL_PLACES {
        errors.add(
            field,
            format!("Ensure that there are no more than {PRICE_DECIMAL_PLACES} decimal places."),
        );
    } else if value.trunc() >= Decimal::from(10u64.pow(PRICE_INTEGER_DIGITS)) {
        errors.add(
            field,
            format!(
                "Ensure that there are no more than {PRICE_INTEGER_DIGITS} digits before the decimal point."
            ),
        );
    }
}

/// Checks the fields an admin form can get wrong.
pub(crate) fn validate_product(
    name: &str,
    price: Decimal,
    offer_price: Option<Decimal>,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if name.trim().is_empty() {
        errors.add("name", "Name is required.");
    }
    check_price(&mut errors, "price", "Price", price);
    if let Some(offer) = offer_price {
        check_price(&mut errors, "offer_price", "Offer price", offer);
    }
    errors.into_result()
}
