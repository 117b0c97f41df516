//! ActorEntity trait implementation for the Product domain type.
//!
//! Stock accounting lives here: every change goes through
//! [`Product::handle_action`], which runs inside the catalog actor one request
//! at a time. Two checkouts racing for the last unit are therefore ordered,
//! and the loser sees `InsufficientStock`.

use super::actions::{CatalogAction, CatalogActionResult, ReservedLine};
use super::error::CatalogError;
use crate::model::{validate_product, Product, ProductCreate, ProductId, ProductUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

impl Product {
    fn shortfall(&self, requested: u32) -> CatalogError {
        CatalogError::InsufficientStock {
            product_id: self.id,
            requested,
            available: self.stock,
        }
    }

    fn take(&mut self, quantity: u32) -> Result<(), CatalogError> {
        self.stock = self
            .stock
            .checked_sub(quantity)
            .ok_or_else(|| self.shortfall(quantity))?;
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = CatalogAction;
    type ActionResult = CatalogActionResult;
    type Context = ();
    type Error = CatalogError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        validate_product(&params.name, params.price, params.offer_price)?;
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            description: params.description,
            category: params.category,
            warranty: params.warranty,
            price: params.price,
            offer_price: params.offer_price,
            stock: params.stock,
            created_at: Utc::now(),
            order_refs: 0,
        })
    }

    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(warranty) = update.warranty {
            self.warranty = warranty;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(offer_price) = update.offer_price {
            self.offer_price = offer_price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        validate_product(&self.name, self.price, self.offer_price)?;
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        if self.order_refs > 0 {
            return Err(CatalogError::Protected(self.id));
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CatalogAction,
        _ctx: &(),
    ) -> Result<CatalogActionResult, Self::Error> {
        match action {
            CatalogAction::CheckStock => Ok(CatalogActionResult::CheckStock(self.stock)),
            CatalogAction::AdjustStock(delta) => {
                if delta < 0 {
                    self.take(u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX))?;
                } else {
                    self.stock = u32::try_from(delta)
                        .ok()
                        .and_then(|added| self.stock.checked_add(added))
                        .ok_or(CatalogError::StockOverflow {
                            product_id: self.id,
                            stock: self.stock,
                            delta,
                        })?;
                }
                Ok(CatalogActionResult::AdjustStock(self.stock))
            }
            CatalogAction::Reserve(quantity) => {
                self.take(quantity)?;
                self.order_refs += 1;
                Ok(CatalogActionResult::Reserve(ReservedLine {
                    product_id: self.id,
                    name: self.name.clone(),
                    unit_price: self.effective_price(),
                    quantity,
                }))
            }
            CatalogAction::Release(quantity) => {
                self.stock = self.stock.saturating_add(quantity);
                self.order_refs = self.order_refs.saturating_sub(1);
                Ok(CatalogActionResult::Release(self.stock))
            }
        }
    }
}
