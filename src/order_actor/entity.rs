//! `ActorEntity` implementation for [`Order`].
//!
//! Creation validates the request and resolves the chef from the catalog owner of the
//! first item's meal. After that only `status` and `delivered_at` ever change.

use super::actions::OrderAction;
use super::error::OrderError;
use super::OrderContext;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use rust_decimal::Decimal;
use tracing::info;

fn validate(params: &OrderCreate) -> Result<(), OrderError> {
    if params.items.is_empty() {
        return Err(OrderError::EmptyOrder);
    }
    if let Some(item) = params.items.iter().find(|item| item.quantity == 0) {
        return Err(OrderError::ValidationError(format!(
            "quantity of {} must be at least 1",
            item.meal_id
        )));
    }
    let missing = params.delivery_address.missing_fields();
    if !missing.is_empty() {
        return Err(OrderError::ValidationError(format!(
            "delivery address is missing {}",
            missing.join(", ")
        )));
    }
    if params.payment_method.trim().is_empty() {
        return Err(OrderError::ValidationError("payment method is required".into()));
    }
    if params.total_price < Decimal::ZERO {
        return Err(OrderError::ValidationError("total price must not be negative".into()));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = OrderContext;
    type Error = OrderError;

    async fn from_create_params(id: OrderId, params: OrderCreate, ctx: &OrderContext) -> Result<Self, OrderError> {
        validate(&params)?;
        let first_meal = params.items[0].meal_id;
        let chef_id = ctx.find_meal(first_meal).await?.chef_id;

        Ok(Self {
            id,
            buyer_id: params.buyer_id,
            chef_id,
            items: params.items,
            delivery_address: params.delivery_address,
            total_price: params.total_price,
            status: OrderStatus::Pending,
            payment_method: params.payment_method,
            payment_result: params.payment_result,
            delivered_at: None,
            created_at: Utc::now(),
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &OrderContext) -> Result<(), OrderError> {
        Ok(())
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &OrderContext) -> Result<Order, OrderError> {
        match action {
            OrderAction::View { requester } => {
                if !self.involves(requester) {
                    return Err(OrderError::Unauthorized(format!(
                        "{requester} is not a party to {}",
                        self.id
                    )));
                }
            }
            OrderAction::SetStatus { requester, status } => {
                if requester != self.chef_id {
                    return Err(OrderError::Unauthorized(format!(
                        "{requester} is not the chef of {}",
                        self.id
                    )));
                }
                if status == OrderStatus::Delivered {
                    self.delivered_at = Some(Utc::now());
                }
                info!(order = %self.id, from = %self.status, to = %status, "Status changed");
                self.status = status;
            }
        }
        Ok(self.clone())
    }
}
