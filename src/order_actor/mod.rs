//! # Order Actor
//!
//! Turns a buyer's checkout into an immutable order record and runs its status changes.
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Order`]
//! - [`actions`] - [`OrderAction`]: `View` and `SetStatus`, both authorized in the actor
//! - [`error`] - [`OrderError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! The actor's context is the catalog, used once per order to find the chef who owns
//! the first item's meal.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::catalog_actor::Catalog;
use crate::clients::OrderClient;
use crate::model::Order;
use resource_actor::ResourceActor;
use std::sync::Arc;

/// Dependencies injected into every order hook.
pub type OrderContext = Arc<dyn Catalog>;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
