//! # HTTP API
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /health` | [`health::health`] |
//! | `GET /cart` | [`cart::get_cart`] |
//! | `POST /cart/add` | [`cart::add_item`] |
//! | `PUT /cart/update/{cartItemId}` | [`cart::update_item`] |
//! | `DELETE /cart/remove/{cartItemId}` | [`cart::remove_item`] |
//! | `DELETE /cart/clear` | [`cart::clear`] |
//! | `POST /cart/promo` / `DELETE /cart/promo` | [`cart::apply_promo`] / [`cart::remove_promo`] |
//! | `POST /orders` | [`orders::create_order`] |
//! | `GET /orders/my-orders` | [`orders::my_orders`] |
//! | `GET /orders/chef-orders` | [`orders::chef_orders`] (chefs only) |
//! | `GET /orders/{id}` | [`orders::get_order`] (buyer or chef) |
//! | `PUT /orders/{id}/status` | [`orders::update_status`] (the order's chef) |
//!
//! Every route except `/health` requires a [`CurrentUser`](auth::CurrentUser).

pub mod auth;
pub mod cart;
pub mod error;
pub mod health;
pub mod orders;

pub use error::ApiError;

use crate::clients::{AccountClient, CartClient, CatalogClient, OrderClient};
use crate::model::{Cart, Order};
use crate::projection::{load_cart_view, load_order_views, CartView, Counterpart, OrderView};
use axum::routing::{delete, get, post, put};
use axum::Router;
use chrono::Utc;
use tower_http::trace::TraceLayer;

/// Handler state: a clone of every actor client.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogClient,
    pub accounts: AccountClient,
    pub carts: CartClient,
    pub orders: OrderClient,
}

impl AppState {
    async fn cart_view(&self, cart: &Cart) -> Result<CartView, ApiError> {
        Ok(load_cart_view(cart, &self.catalog, &self.accounts, Utc::now()).await?)
    }

    async fn order_view(&self, order: Order, counterpart: Counterpart) -> Result<OrderView, ApiError> {
        let mut views = load_order_views(std::slice::from_ref(&order), &self.accounts, counterpart).await?;
        views
            .pop()
            .ok_or_else(|| ApiError::Internal(format!("no view produced for {}", order.id)))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/cart", get(cart::get_cart))
        .route("/cart/add", post(cart::add_item))
        .route("/cart/update/{cart_item_id}", put(cart::update_item))
        .route("/cart/remove/{cart_item_id}", delete(cart::remove_item))
        .route("/cart/clear", delete(cart::clear))
        .route("/cart/promo", post(cart::apply_promo).delete(cart::remove_promo))
        .route("/orders", post(orders::create_order))
        .route("/orders/my-orders", get(orders::my_orders))
        .route("/orders/chef-orders", get(orders::chef_orders))
        .route("/orders/{id}", get(orders::get_order))
        .route("/orders/{id}/status", put(orders::update_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
