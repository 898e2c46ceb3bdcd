//! `ActorEntity` implementation for [`Meal`].

use super::actions::MealAction;
use super::error::CatalogError;
use crate::model::{Meal, MealCreate, MealId, MealInfo};
use async_trait::async_trait;
use resource_actor::ActorEntity;
use rust_decimal::Decimal;

fn validate_price(price: Decimal) -> Result<(), CatalogError> {
    if price <= Decimal::ZERO {
        return Err(CatalogError::ValidationError(format!(
            "price must be positive, got {price}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Meal {
    type Id = MealId;
    type Create = MealCreate;
    type Update = ();
    type Action = MealAction;
    type ActionResult = MealInfo;
    type Context = ();
    type Error = CatalogError;

    async fn from_create_params(id: MealId, params: MealCreate, _ctx: &()) -> Result<Self, CatalogError> {
        if params.name.trim().is_empty() {
            return Err(CatalogError::ValidationError("name is required".into()));
        }
        validate_price(params.price)?;
        Ok(Self {
            id,
            chef_id: params.chef_id,
            name: params.name,
            price: params.price,
            available: params.available,
            image: params.image,
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), CatalogError> {
        Ok(())
    }

    async fn handle_action(&mut self, action: MealAction, _ctx: &()) -> Result<MealInfo, CatalogError> {
        match action {
            MealAction::Find => Ok(self.info()),
        }
    }
}
