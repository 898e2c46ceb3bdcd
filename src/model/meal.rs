use crate::model::UserId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for meals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealId(pub u32);

impl From<u32> for MealId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MealId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "meal_{}", self.0)
    }
}

/// A meal listed by a chef.
///
/// # Actor Framework
/// Managed by the catalog actor, see [`crate::catalog_actor`]. The cart and order
/// engines only read it, through [`MealInfo`] snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Meal {
    pub id: MealId,
    pub chef_id: UserId,
    pub name: String,
    pub price: Decimal,
    pub available: bool,
    pub image: Option<String>,
}

impl Meal {
    pub fn info(&self) -> MealInfo {
        MealInfo {
            id: self.id,
            chef_id: self.chef_id,
            name: self.name.clone(),
            price: self.price,
            available: self.available,
            image: self.image.clone(),
        }
    }
}

/// What a catalog lookup returns: price, owner and availability at lookup time.
#[derive(Debug, Clone, PartialEq)]
pub struct MealInfo {
    pub id: MealId,
    pub chef_id: UserId,
    pub name: String,
    pub price: Decimal,
    pub available: bool,
    pub image: Option<String>,
}

/// Payload for listing a meal.
#[derive(Debug, Clone)]
pub struct MealCreate {
    pub chef_id: UserId,
    pub name: String,
    pub price: Decimal,
    pub available: bool,
    pub image: Option<String>,
}
