//! # Cart Actor
//!
//! One cart per user, keyed by the owner's id. Carts are created on first read or add
//! and dropped by the actor's retention sweep once idle for the configured period.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Cart`]
//! - [`actions`] - [`CartAction`], one variant per cart mutation
//! - [`error`] - [`CartError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Context
//!
//! The cart actor reads meal prices and resolves promo codes while it mutates a cart,
//! so its context is a [`CartContext`] holding both capabilities:
//!
//! ```rust,ignore
//! let context = CartContext {
//!     catalog: Arc::new(catalog_client.clone()),
//!     promos: Arc::new(StaticPromoTable::builtin()),
//! };
//! tokio::spawn(cart_actor.run(context));
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::catalog_actor::Catalog;
use crate::clients::CartClient;
use crate::model::Cart;
use crate::promo::PromoLookup;
use resource_actor::{ResourceActor, Retention};
use std::sync::Arc;

/// Largest quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// Dependencies injected into every cart hook.
#[derive(Clone)]
pub struct CartContext {
    pub catalog: Arc<dyn Catalog>,
    pub promos: Arc<dyn PromoLookup>,
}

/// Creates a new cart actor whose idle carts are evicted according to `retention`.
pub fn new(buffer_size: usize, retention: Retention) -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::with_retention(buffer_size, retention);
    (actor, CartClient::new(generic_client))
}
