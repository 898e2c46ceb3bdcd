//! # Order Client
//!
//! Provides a high-level API for interacting with the `Order` actor.
//! Validation and chef resolution happen in the actor's `from_create_params` hook;
//! authorization happens in its actions.

use crate::model::{Order, OrderCreate, OrderId, OrderStatus, UserId};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use resource_actor::{ActorClient, Filter, FrameworkError, ResourceClient};
use std::cmp::Reverse;
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

    /// Places an order and returns it as stored.
    #[instrument(skip(self, params), fields(buyer = %params.buyer_id, items = params.items.len()))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        let buyer = params.buyer_id;
        let id = self.inner.create(params).await?;
        info!(order = %id, "Order placed");
        self.view(buyer, id).await
    }

    /// The order, if `requester` is its buyer or its chef.
    #[instrument(skip(self))]
    pub async fn view(&self, requester: UserId, id: OrderId) -> Result<Order, OrderError> {
        debug!("Sending request");
        Ok(self
            .inner
            .perform_action(id, OrderAction::View { requester })
            .await?)
    }

    /// Sets the status. Only the order's chef may do this.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        requester: UserId,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        Ok(self
            .inner
            .perform_action(id, OrderAction::SetStatus { requester, status })
            .await?)
    }

    /// Orders placed by `buyer`, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_buyer(&self, buyer: UserId) -> Result<Vec<Order>, OrderError> {
        self.list_where(Filter::new(move |order: &Order| order.buyer_id == buyer))
            .await
    }

    /// Orders addressed to `chef`, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_chef(&self, chef: UserId) -> Result<Vec<Order>, OrderError> {
        self.list_where(Filter::new(move |order: &Order| order.chef_id == chef))
            .await
    }

    async fn list_where(&self, filter: Filter<Order>) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.inner.list(filter).await?;
        orders.sort_by_key(|order| Reverse((order.created_at, order.id)));
        Ok(orders)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError<OrderError>) -> Self::Error {
        e.into()
    }
}
