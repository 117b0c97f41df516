//! # Cart Client
//!
//! Every shopper-facing method takes the caller's [`Session`] and fails with
//! `Unauthenticated` for anonymous callers. The cart is created on the first
//! add; reads on a user without a cart behave like an empty cart.
use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::model::{Cart, CartCreate, CartItem, CartItemId, CartSummary, ProductId, UserId};
use crate::session::Session;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for interacting with the cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<CartError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => CartError::NotFound(id),
            Err(other) => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn unexpected(result: CartActionResult) -> CartError {
    CartError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    /// Runs an action on the user's cart. `Ok(None)` means the user has no cart yet.
    async fn act(
        &self,
        user: UserId,
        action: CartAction,
    ) -> Result<Option<CartActionResult>, CartError> {
        match self.inner.perform_action(user, action).await {
            Ok(result) => Ok(Some(result)),
            Err(FrameworkError::NotFound(_)) => Ok(None),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    async fn act_on_item(
        &self,
        user: UserId,
        item_id: CartItemId,
        action: CartAction,
    ) -> Result<CartActionResult, CartError> {
        self.act(user, action)
            .await?
            .ok_or_else(|| CartError::NotFound(item_id.to_string()))
    }

    async fn ensure_cart(&self, user: UserId) -> Result<Cart, CartError> {
        self.inner
            .ensure(user, CartCreate)
            .await
            .map_err(Self::map_error)
    }

    /// Adds one unit of a product, creating the cart if needed.
    #[instrument(skip(self, session))]
    pub async fn add_item(
        &self,
        session: &Session,
        product_id: ProductId,
    ) -> Result<CartItem, CartError> {
        let user = session.require_user()?;
        self.ensure_cart(user).await?;
        match self.act(user, CartAction::Add(product_id)).await? {
            Some(CartActionResult::Add(item)) => {
                debug!(%user, item_id = %item.id, quantity = item.quantity, "Added to cart");
                Ok(item)
            }
            Some(other) => Err(unexpected(other)),
            None => Err(CartError::NotFound(user.to_string())),
        }
    }

    #[instrument(skip(self, session))]
    pub async fn increment_item(
        &self,
        session: &Session,
        item_id: CartItemId,
    ) -> Result<CartItem, CartError> {
        let user = session.require_user()?;
        match self
            .act_on_item(user, item_id, CartAction::Increment(item_id))
            .await?
        {
            CartActionResult::Increment(item) => Ok(item),
            other => Err(unexpected(other)),
        }
    }

    /// Returns the remaining line, or `None` when the line was removed.
    #[instrument(skip(self, session))]
    pub async fn decrement_item(
        &self,
        session: &Session,
        item_id: CartItemId,
    ) -> Result<Option<CartItem>, CartError> {
        let user = session.require_user()?;
        match self
            .act_on_item(user, item_id, CartAction::Decrement(item_id))
            .await?
        {
            CartActionResult::Decrement(item) => Ok(item),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, session))]
    pub async fn remove_item(&self, session: &Session, item_id: CartItemId) -> Result<(), CartError> {
        let user = session.require_user()?;
        self.act_on_item(user, item_id, CartAction::Remove(item_id))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, session))]
    pub async fn clear(&self, session: &Session) -> Result<(), CartError> {
        let user = session.require_user()?;
        self.clear_for(user).await
    }

    /// Lines priced at current catalog prices.
    #[instrument(skip(self, session))]
    pub async fn contents(&self, session: &Session) -> Result<CartSummary, CartError> {
        let user = session.require_user()?;
        self.summary_for(user).await
    }

    #[instrument(skip(self, session))]
    pub async fn total(&self, session: &Session) -> Result<Decimal, CartError> {
        Ok(self.contents(session).await?.total)
    }

    /// "Buy now": the cart ends up holding exactly one unit of the product.
    #[instrument(skip(self, session))]
    pub async fn replace_with_single(
        &self,
        session: &Session,
        product_id: ProductId,
    ) -> Result<CartItem, CartError> {
        let user = session.require_user()?;
        self.ensure_cart(user).await?;
        match self
            .act(user, CartAction::ReplaceWithSingle(product_id))
            .await?
        {
            Some(CartActionResult::ReplaceWithSingle(item)) => Ok(item),
            Some(other) => Err(unexpected(other)),
            None => Err(CartError::NotFound(user.to_string())),
        }
    }

    // --- Used by the order engine and account administration ---

    pub async fn summary_for(&self, user: UserId) -> Result<CartSummary, CartError> {
        match self.act(user, CartAction::Summary).await? {
            Some(CartActionResult::Summary(summary)) => Ok(summary),
            Some(other) => Err(unexpected(other)),
            None => Ok(CartSummary::default()),
        }
    }

    /// The stored cart as-is, without pricing.
    pub async fn snapshot(&self, user: UserId) -> Result<Option<Cart>, CartError> {
        self.get(user).await
    }

    pub async fn clear_for(&self, user: UserId) -> Result<(), CartError> {
        match self.act(user, CartAction::Clear).await? {
            Some(CartActionResult::Clear(())) | None => Ok(()),
            Some(other) => Err(unexpected(other)),
        }
    }

    /// Takes checked-out lines out of the cart, leaving anything the shopper
    /// added after `bought` was read.
    pub async fn remove_purchased(&self, user: UserId, bought: Vec<CartItem>) -> Result<(), CartError> {
        match self.act(user, CartAction::RemovePurchased(bought)).await? {
            Some(CartActionResult::RemovePurchased(())) | None => Ok(()),
            Some(other) => Err(unexpected(other)),
        }
    }

    /// Removes the cart record entirely. A user without a cart is fine.
    pub async fn drop_cart(&self, user: UserId) -> Result<(), CartError> {
        match self.inner.delete(user).await {
            Ok(()) | Err(FrameworkError::NotFound(_)) => Ok(()),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, MockClient};

    #[tokio::test]
    async fn test_anonymous_session_is_rejected() {
        let (client, _receiver) = create_mock_client::<Cart>(10);
        let carts = CartClient::new(client);

        let err = carts
            .add_item(&Session::anonymous(), ProductId(1))
            .await
            .unwrap_err();
        assert_eq!(err, CartError::Unauthenticated);
        let err = carts.total(&Session::anonymous()).await.unwrap_err();
        assert_eq!(err, CartError::Unauthenticated);
    }

    #[tokio::test]
    async fn test_missing_cart_reads_as_empty() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action(UserId(3))
            .return_err(FrameworkError::NotFound(UserId(3).to_string()));
        mock.expect_action(UserId(3))
            .return_err(FrameworkError::NotFound(UserId(3).to_string()));

        let carts = CartClient::new(mock.client());
        let session = Session::customer(UserId(3));
        assert_eq!(carts.total(&session).await.unwrap(), Decimal::ZERO);
        carts.clear(&session).await.unwrap();
        mock.verify();
    }

    #[tokio::test]
    async fn test_item_action_without_cart_is_item_not_found() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action(UserId(3))
            .return_err(FrameworkError::NotFound(UserId(3).to_string()));

        let carts = CartClient::new(mock.client());
        let err = carts
            .increment_item(&Session::customer(UserId(3)), CartItemId(8))
            .await
            .unwrap_err();
        assert_eq!(err, CartError::NotFound("item_8".into()));
        mock.verify();
    }
}
