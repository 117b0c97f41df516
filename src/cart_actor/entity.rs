//! ActorEntity trait implementation for the Cart domain type.
//!
//! Stock rules are checked against the catalog at mutation time only. A line
//! may later exceed stock if the catalog changes; checkout catches that when
//! it reserves.

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use super::CartContext;
use crate::model::{
    line_amount, Cart, CartCreate, CartItem, CartItemId, CartLine, CartSummary, Product, UserId,
};
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

fn limit_reached(product: &Product) -> CartError {
    CartError::StockLimitReached {
        product_id: product.id,
        stock: product.stock,
    }
}

fn item_not_found(id: CartItemId) -> CartError {
    CartError::NotFound(id.to_string())
}

impl Cart {
    async fn summarise(&mut self, ctx: &CartContext) -> Result<CartSummary, CartError> {
        let wanted: Vec<_> = self.items.iter().map(|item| item.product_id).collect();
        let products: HashMap<_, _> = ctx
            .catalog
            .find(move |p: &Product| wanted.contains(&p.id))
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let before = self.items.len();
        self.items
            .retain(|item| products.contains_key(&item.product_id));
        if self.items.len() != before {
            debug!(user_id = %self.user_id, pruned = before - self.items.len(), "Dropped lines for deleted products");
            self.touch();
        }

        let mut lines = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let Some(product) = products.get(&item.product_id) else {
                continue;
            };
            let unit_price = product.effective_price();
            lines.push(CartLine {
                item_id: item.id,
                product_id: item.product_id,
                name: product.name.clone(),
                unit_price,
                quantity: item.quantity,
                line_total: line_amount(unit_price, item.quantity)
                    .ok_or(CartError::AmountOutOfRange)?,
            });
        }
        CartSummary::from_lines(lines).ok_or(CartError::AmountOutOfRange)
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = UserId;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = CartContext;
    type Error = CartError;

    fn from_create_params(id: UserId, _params: CartCreate) -> Result<Self, Self::Error> {
        Ok(Cart::new(id))
    }

    async fn on_update(&mut self, _update: (), _ctx: &CartContext) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &CartContext,
    ) -> Result<CartActionResult, Self::Error> {
        match action {
            CartAction::Add(product_id) => {
                let product = ctx.catalog.get_product(product_id).await?;
                if !product.in_stock() {
                    return Err(CartError::OutOfStock(product_id));
                }
                let held = self
                    .items
                    .iter()
                    .find(|item| item.product_id == product_id)
                    .map_or(0, |item| item.quantity);
                if held >= product.stock {
                    return Err(limit_reached(&product));
                }
                let item = match self.item_for_product_mut(product_id) {
                    Some(item) => {
                        item.quantity += 1;
                        item.clone()
                    }
                    None => {
                        let item = CartItem {
                            id: ctx.line_ids.next(),
                            product_id,
                            quantity: 1,
                        };
                        self.items.push(item.clone());
                        item
                    }
                };
                self.touch();
                Ok(CartActionResult::Add(item))
            }
            CartAction::Increment(item_id) => {
                let product_id = self
                    .item(item_id)
                    .map(|item| item.product_id)
                    .ok_or_else(|| item_not_found(item_id))?;
                let product = ctx.catalog.get_product(product_id).await?;
                if !product.in_stock() {
                    return Err(CartError::OutOfStock(product_id));
                }
                let item = self
                    .item_mut(item_id)
                    .ok_or_else(|| item_not_found(item_id))?;
                if item.quantity >= product.stock {
                    return Err(limit_reached(&product));
                }
                item.quantity += 1;
                let item = item.clone();
                self.touch();
                Ok(CartActionResult::Increment(item))
            }
            CartAction::Decrement(item_id) => {
                let item = self
                    .item_mut(item_id)
                    .ok_or_else(|| item_not_found(item_id))?;
                let remaining = if item.quantity > 1 {
                    item.quantity -= 1;
                    Some(item.clone())
                } else {
                    self.items.retain(|item| item.id != item_id);
                    None
                };
                self.touch();
                Ok(CartActionResult::Decrement(remaining))
            }
            CartAction::Remove(item_id) => {
                if self.item(item_id).is_none() {
                    return Err(item_not_found(item_id));
                }
                self.items.retain(|item| item.id != item_id);
                self.touch();
                Ok(CartActionResult::Remove(()))
            }
            CartAction::Clear => {
                self.items.clear();
                self.touch();
                Ok(CartActionResult::Clear(()))
            }
            CartAction::RemovePurchased(bought) => {
                for sold in &bought {
                    if let Some(item) = self.item_mut(sold.id) {
                        item.quantity = item.quantity.saturating_sub(sold.quantity);
                    }
                }
                self.items.retain(|item| item.quantity > 0);
                self.touch();
                Ok(CartActionResult::RemovePurchased(()))
            }
            CartAction::ReplaceWithSingle(product_id) => {
                let product = ctx.catalog.get_product(product_id).await?;
                if !product.in_stock() {
                    return Err(CartError::OutOfStock(product_id));
                }
                let item = CartItem {
                    id: ctx.line_ids.next(),
                    product_id,
                    quantity: 1,
                };
                self.items.clear();
                self.items.push(item.clone());
                self.touch();
                Ok(CartActionResult::ReplaceWithSingle(item))
            }
            CartAction::Summary => Ok(CartActionResult::Summary(self.summarise(ctx).await?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::CatalogClient;
    use crate::model::{Category, IdSequence, ProductId};
    use actor_framework::mock::MockClient;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn product(id: u32, stock: u32) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Product {id}"),
            description: String::new(),
            category: Category::Actuators,
            warranty: None,
            price: Decimal::from(100),
            offer_price: Some(Decimal::from(80)),
            stock,
            created_at: Utc::now(),
            order_refs: 0,
        }
    }

    fn context(mock: &MockClient<Product>) -> CartContext {
        CartContext::new(CatalogClient::new(mock.client()), IdSequence::default())
    }

    #[tokio::test]
    async fn add_merges_into_existing_line() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId(1)).return_ok(Some(product(1, 5)));
        mock.expect_get(ProductId(1)).return_ok(Some(product(1, 5)));
        let ctx = context(&mock);

        let mut cart = Cart::new(UserId(1));
        cart.handle_action(CartAction::Add(ProductId(1)), &ctx)
            .await
            .unwrap();
        cart.handle_action(CartAction::Add(ProductId(1)), &ctx)
            .await
            .unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        mock.verify();
    }

    #[tokio::test]
    async fn add_rejects_out_of_stock_and_limit() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId(1)).return_ok(Some(product(1, 0)));
        mock.expect_get(ProductId(2)).return_ok(Some(product(2, 1)));
        mock.expect_get(ProductId(2)).return_ok(Some(product(2, 1)));
        let ctx = context(&mock);

        let mut cart = Cart::new(UserId(1));
        let err = cart
            .handle_action(CartAction::Add(ProductId(1)), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err, CartError::OutOfStock(ProductId(1)));

        cart.handle_action(CartAction::Add(ProductId(2)), &ctx)
            .await
            .unwrap();
        let err = cart
            .handle_action(CartAction::Add(ProductId(2)), &ctx)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CartError::StockLimitReached {
                product_id: ProductId(2),
                stock: 1
            }
        );
        mock.verify();
    }

    #[tokio::test]
    async fn increment_respects_stock() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId(1)).return_ok(Some(product(1, 2)));
        mock.expect_get(ProductId(1)).return_ok(Some(product(1, 2)));
        mock.expect_get(ProductId(1)).return_ok(Some(product(1, 0)));
        let ctx = context(&mock);

        let mut cart = Cart::new(UserId(1));
        cart.items.push(CartItem {
            id: CartItemId(7),
            product_id: ProductId(1),
            quantity: 1,
        });

        let result = cart
            .handle_action(CartAction::Increment(CartItemId(7)), &ctx)
            .await
            .unwrap();
        assert!(matches!(result, CartActionResult::Increment(ref item) if item.quantity == 2));

        let err = cart
            .handle_action(CartAction::Increment(CartItemId(7)), &ctx)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CartError::StockLimitReached {
                product_id: ProductId(1),
                stock: 2
            }
        );
        assert_eq!(cart.items[0].quantity, 2);

        let err = cart
            .handle_action(CartAction::Increment(CartItemId(7)), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err, CartError::OutOfStock(ProductId(1)));

        let err = cart
            .handle_action(CartAction::Increment(CartItemId(8)), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err, CartError::NotFound(CartItemId(8).to_string()));
        mock.verify();
    }

    #[tokio::test]
    async fn replace_with_single_leaves_one_unit() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId(3)).return_ok(Some(product(3, 4)));
        mock.expect_get(ProductId(4)).return_ok(Some(product(4, 0)));
        let ctx = context(&mock);

        let mut cart = Cart::new(UserId(1));
        for (id, product_id, quantity) in [(1, 1, 2), (2, 2, 1)] {
            cart.items.push(CartItem {
                id: CartItemId(id),
                product_id: ProductId(product_id),
                quantity,
            });
        }

        let result = cart
            .handle_action(CartAction::ReplaceWithSingle(ProductId(3)), &ctx)
            .await
            .unwrap();
        let CartActionResult::ReplaceWithSingle(item) = result else {
            panic!("expected replaced line");
        };
        assert_eq!(cart.items, vec![item.clone()]);
        assert_eq!(item.product_id, ProductId(3));
        assert_eq!(item.quantity, 1);

        let err = cart
            .handle_action(CartAction::ReplaceWithSingle(ProductId(4)), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err, CartError::OutOfStock(ProductId(4)));
        assert_eq!(cart.items, vec![item]);
        mock.verify();
    }

    #[tokio::test]
    async fn remove_purchased_keeps_later_additions() {
        let mock = MockClient::<Product>::new();
        let ctx = context(&mock);
        let mut cart = Cart::new(UserId(1));
        for (id, product_id, quantity) in [(1, 1, 3), (2, 2, 1), (3, 3, 1)] {
            cart.items.push(CartItem {
                id: CartItemId(id),
                product_id: ProductId(product_id),
                quantity,
            });
        }
        // Checked out two of line 1 and all of line 2; line 1 was topped up
        // and line 3 added while the order was being placed.
        let bought = vec![
            CartItem {
                id: CartItemId(1),
                product_id: ProductId(1),
                quantity: 2,
            },
            CartItem {
                id: CartItemId(2),
                product_id: ProductId(2),
                quantity: 1,
            },
        ];

        cart.handle_action(CartAction::RemovePurchased(bought), &ctx)
            .await
            .unwrap();

        let left: Vec<(CartItemId, u32)> = cart.items.iter().map(|i| (i.id, i.quantity)).collect();
        assert_eq!(left, vec![(CartItemId(1), 1), (CartItemId(3), 1)]);
    }

    #[tokio::test]
    async fn decrement_at_one_removes_line() {
        let mock = MockClient::<Product>::new();
        let ctx = context(&mock);
        let mut cart = Cart::new(UserId(1));
        cart.items.push(CartItem {
            id: CartItemId(7),
            product_id: ProductId(1),
            quantity: 1,
        });

        let result = cart
            .handle_action(CartAction::Decrement(CartItemId(7)), &ctx)
            .await
            .unwrap();
        assert!(matches!(result, CartActionResult::Decrement(None)));
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn summary_prunes_deleted_products() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_list().return_ok(vec![product(1, 5)]);
        let ctx = context(&mock);

        let mut cart = Cart::new(UserId(1));
        for (id, product_id, quantity) in [(1, 1, 2), (2, 99, 1)] {
            cart.items.push(CartItem {
                id: CartItemId(id),
                product_id: ProductId(product_id),
                quantity,
            });
        }

        let result = cart
            .handle_action(CartAction::Summary, &ctx)
            .await
            .unwrap();
        let CartActionResult::Summary(summary) = result else {
            panic!("expected summary");
        };
        assert_eq!(summary.total, Decimal::from(160));
        assert_eq!(cart.items.len(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn summary_rejects_unpriceable_total() {
        let mut pricey = product(1, 5);
        pricey.price = Decimal::MAX;
        pricey.offer_price = None;
        let mut mock = MockClient::<Product>::new();
        mock.expect_list().return_ok(vec![pricey]);
        let ctx = context(&mock);

        let mut cart = Cart::new(UserId(1));
        cart.items.push(CartItem {
            id: CartItemId(1),
            product_id: ProductId(1),
            quantity: 2,
        });

        let err = cart
            .handle_action(CartAction::Summary, &ctx)
            .await
            .unwrap_err();
        assert_eq!(err, CartError::AmountOutOfRange);
        mock.verify();
    }
}
