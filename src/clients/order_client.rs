//! # Order Client
//!
//! Placement and tracking. Shoppers see only their own orders; another user's
//! order ID reads as `NotFound`. Listing every order and moving an order
//! through its status machine are staff operations.
use crate::model::{AddressId, Order, OrderId, OrderStatus, PaymentMethod, PlaceOrder, UserId};
use crate::order_actor::OrderError;
use crate::session::Session;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// Newest first.
fn newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Turns the caller's cart into an order.
    ///
    /// `payment_ref` is the gateway transaction id and is required for
    /// [`PaymentMethod::Online`]. On any failure the cart, stock and address
    /// are left as they were.
    #[instrument(skip(self, session, payment_ref))]
    pub async fn place_order(
        &self,
        session: &Session,
        address_id: AddressId,
        payment_method: PaymentMethod,
        payment_ref: Option<String>,
    ) -> Result<Order, OrderError> {
        let user_id = session.require_user()?;
        let params = PlaceOrder {
            user_id,
            address_id,
            payment_method,
            payment_ref,
        };
        debug!(%user_id, %address_id, %payment_method, "place_order called");

        let order_id = self.inner.create(params).await.map_err(Self::map_error)?;
        let order = self
            .get(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;
        info!(%order_id, %user_id, total = %order.total_price, "Order accepted");
        Ok(order)
    }

    /// The caller's orders, newest first, with their items.
    #[instrument(skip(self, session))]
    pub async fn orders_for(&self, session: &Session) -> Result<Vec<Order>, OrderError> {
        let user = session.require_user()?;
        let mut orders = self.find(move |order: &Order| order.user_id == user).await?;
        newest_first(&mut orders);
        Ok(orders)
    }

    #[instrument(skip(self, session))]
    pub async fn order_detail(&self, session: &Session, id: OrderId) -> Result<Order, OrderError> {
        let user = session.require_user()?;
        self.get(id)
            .await?
            .filter(|order| order.user_id == user)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Staff view of all orders, optionally for one customer. Newest first.
    #[instrument(skip(self, session))]
    pub async fn list_all(
        &self,
        session: &Session,
        customer: Option<UserId>,
    ) -> Result<Vec<Order>, OrderError> {
        session.require_staff()?;
        let mut orders = self
            .find(move |order: &Order| customer.map_or(true, |user| order.user_id == user))
            .await?;
        newest_first(&mut orders);
        Ok(orders)
    }

    #[instrument(skip(self, session))]
    pub async fn update_status(
        &self,
        session: &Session,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        session.require_staff()?;
        let order = self
            .inner
            .update(id, status)
            .await
            .map_err(Self::map_error)?;
        info!(order_id = %id, %status, "Order status changed");
        Ok(order)
    }
}
