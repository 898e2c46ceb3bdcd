//! # Catalog Actor
//!
//! Holds the meal listings: price, availability and the owning chef. The cart and
//! order engines only read it, through the [`Catalog`] capability.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Meal`]
//! - [`actions`] - [`MealAction`]
//! - [`error`] - [`CatalogError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use meal_market::catalog_actor::{self, Catalog};
//! use meal_market::model::{MealCreate, MealId, UserId};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = catalog_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let listing = MealCreate {
//!         chef_id: UserId(1),
//!         name: "Dal Makhani".into(),
//!         price: Decimal::new(1100, 2),
//!         available: true,
//!         image: None,
//!     };
//!     client.ensure_meal(MealId(3), listing).await?;
//!     let meal = client.find_meal(MealId(3)).await?;
//!     assert_eq!(meal.chef_id, UserId(1));
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CatalogClient;
use crate::model::{Meal, MealId, MealInfo};
use async_trait::async_trait;
use resource_actor::ResourceActor;

/// Read-only meal lookup used by the cart and order engines.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Current price, owner and availability of a meal, or `CatalogError::NotFound`.
    async fn find_meal(&self, id: MealId) -> Result<MealInfo, CatalogError>;
}

/// Creates a new catalog actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Meal>, CatalogClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CatalogClient::new(generic_client))
}
