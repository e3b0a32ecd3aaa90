//! # Order Client
//!
//! Orchestration (cart snapshot, order code, payment link) happens in the Order actor's
//! `on_create` hook; this client only addresses orders by their order code.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{CartId, CreatedOrder, Order, OrderCode, OrderCreate, OrderStatus, UserName};
use crate::order_actor::{OrderAction, OrderError};
use crate::services::OrderService;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Places an order for the cart and returns it as stored.
    #[instrument(skip(self))]
    pub async fn place_order(&self, cart_id: CartId) -> Result<Order, OrderError> {
        debug!("Sending request");
        let id = self
            .inner
            .create(OrderCreate { cart_id })
            .await
            .map_err(Self::map_error)?;
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn by_code(&self, order_code: OrderCode) -> Result<Order, OrderError> {
        self.find(move |order: &Order| order.order_code == order_code)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| OrderError::NotFound(order_code.to_string()))
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into_entity_error(|e| match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::Unavailable(other.to_string()),
        })
    }
}

#[async_trait]
impl OrderService for OrderClient {
    async fn create_order(&self, cart_id: CartId) -> Result<CreatedOrder, OrderError> {
        let order = self.place_order(cart_id).await?;
        Ok(CreatedOrder {
            order_code: order.order_code,
            qr_code: order.qr_code,
            amount: order.total_price,
        })
    }

    #[instrument(skip(self))]
    async fn change_status(&self, order_code: OrderCode, status: OrderStatus) -> Result<bool, OrderError> {
        let order = self.by_code(order_code).await?;
        let changed = self
            .inner
            .perform_action(order.id, OrderAction::ChangeStatus(status))
            .await
            .map_err(Self::map_error)?;
        if changed {
            info!("Order status applied");
        }
        Ok(changed)
    }

    async fn pending_order(&self, user: &UserName) -> Result<Option<OrderCode>, OrderError> {
        let owner = user.clone();
        let pending = self
            .find(move |order: &Order| order.user == owner && order.status == OrderStatus::Pending)
            .await?;
        Ok(pending
            .into_iter()
            .max_by_key(|order| (order.created_at, order.id.0))
            .map(|order| order.order_code))
    }

    async fn orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.find(move |order: &Order| order.status == status).await?;
        orders.sort_by_key(|order| order.id.0);
        Ok(orders)
    }
}
