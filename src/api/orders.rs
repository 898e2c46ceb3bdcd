//! Order routes.

use super::auth::CurrentUser;
use super::error::ApiError;
use super::AppState;
use crate::model::{DeliveryAddress, MealId, OrderCreate, OrderId, OrderLineItem, OrderStatus, PaymentResult};
use crate::projection::{load_order_views, Counterpart, OrderView};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub meal_id: MealId,
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub order_items: Vec<OrderItemRequest>,
    pub delivery_address: DeliveryAddress,
    pub payment_method: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(default)]
    pub payment_result: Option<PaymentResult>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

impl CreateOrderRequest {
    fn into_params(self, buyer: CurrentUser) -> OrderCreate {
        OrderCreate {
            buyer_id: buyer.id,
            items: self
                .order_items
                .into_iter()
                .map(|item| OrderLineItem {
                    meal_id: item.meal_id,
                    name: item.name,
                    quantity: item.quantity,
                    unit_price: item.price,
                    image: item.image,
                })
                .collect(),
            delivery_address: self.delivery_address,
            payment_method: self.payment_method,
            total_price: self.total_price,
            payment_result: self.payment_result,
        }
    }
}

pub async fn create_order(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderView>), ApiError> {
    let Json(req) = payload?;
    let order = state.orders.create_order(req.into_params(user)).await?;
    let view = state.order_view(order, Counterpart::Both).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_order(
    State(state): State<AppState>,
    user: CurrentUser,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<OrderView>, ApiError> {
    let Path(id) = id?;
    let order = state.orders.view(user.id, OrderId(id)).await?;
    Ok(Json(state.order_view(order, Counterpart::Both).await?))
}

/// The caller's purchases, with each chef's name.
pub async fn my_orders(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<OrderView>>, ApiError> {
    let orders = state.orders.list_for_buyer(user.id).await?;
    Ok(Json(load_order_views(&orders, &state.accounts, Counterpart::Chef).await?))
}

/// Orders addressed to the calling chef, with each buyer's name.
pub async fn chef_orders(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<OrderView>>, ApiError> {
    user.require_chef()?;
    let orders = state.orders.list_for_chef(user.id).await?;
    Ok(Json(load_order_views(&orders, &state.accounts, Counterpart::Buyer).await?))
}

pub async fn update_status(
    State(state): State<AppState>,
    user: CurrentUser,
    id: Result<Path<u32>, PathRejection>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<Json<OrderView>, ApiError> {
    user.require_chef()?;
    let Path(id) = id?;
    let Json(req) = payload?;
    let status: OrderStatus = req.status.parse().map_err(ApiError::InvalidInput)?;
    let order = state.orders.set_status(user.id, OrderId(id), status).await?;
    Ok(Json(state.order_view(order, Counterpart::Both).await?))
}
