//! Cart routes. Every route acts on the caller's own cart.

use super::auth::CurrentUser;
use super::error::ApiError;
use super::AppState;
use crate::model::{Cart, CartItemId, MealId};
use crate::projection::CartView;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub meal_id: MealId,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub quantity: u32,
    /// Absent leaves the instructions as they are; `""` clears them.
    #[serde(default)]
    pub special_instructions: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromoRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub message: &'static str,
    pub cart: CartView,
}

async fn respond(state: &AppState, message: &'static str, cart: Cart) -> Result<Json<CartResponse>, ApiError> {
    Ok(Json(CartResponse {
        message,
        cart: state.cart_view(&cart).await?,
    }))
}

pub async fn get_cart(State(state): State<AppState>, user: CurrentUser) -> Result<Json<CartView>, ApiError> {
    let cart = state.carts.get_or_create(user.id).await?;
    Ok(Json(state.cart_view(&cart).await?))
}

pub async fn add_item(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Json<CartResponse>, ApiError> {
    let Json(req) = payload?;
    let cart = state.carts.add_item(user.id, req.meal_id, req.quantity).await?;
    respond(&state, "Item added to cart", cart).await
}

pub async fn update_item(
    State(state): State<AppState>,
    user: CurrentUser,
    item_id: Result<Path<u32>, PathRejection>,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<Json<CartResponse>, ApiError> {
    let Path(item_id) = item_id?;
    let Json(req) = payload?;
    let cart = state
        .carts
        .update_item(user.id, CartItemId(item_id), req.quantity, req.special_instructions)
        .await?;
    respond(&state, "Cart item updated", cart).await
}

pub async fn remove_item(
    State(state): State<AppState>,
    user: CurrentUser,
    item_id: Result<Path<u32>, PathRejection>,
) -> Result<Json<CartResponse>, ApiError> {
    let Path(item_id) = item_id?;
    let cart = state.carts.remove_item(user.id, CartItemId(item_id)).await?;
    respond(&state, "Item removed from cart", cart).await
}

pub async fn clear(State(state): State<AppState>, user: CurrentUser) -> Result<Json<CartResponse>, ApiError> {
    let cart = state.carts.clear(user.id).await?;
    respond(&state, "Cart cleared", cart).await
}

pub async fn apply_promo(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<PromoRequest>, JsonRejection>,
) -> Result<Json<CartResponse>, ApiError> {
    let Json(req) = payload?;
    let cart = state.carts.apply_promo(user.id, req.code).await?;
    respond(&state, "Promo code applied", cart).await
}

pub async fn remove_promo(State(state): State<AppState>, user: CurrentUser) -> Result<Json<CartResponse>, ApiError> {
    let cart = state.carts.remove_promo(user.id).await?;
    respond(&state, "Promo code removed", cart).await
}
