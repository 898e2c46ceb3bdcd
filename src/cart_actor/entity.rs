//! `ActorEntity` implementation for [`Cart`].
//!
//! Carts are keyed by their owner's [`UserId`] and built lazily through `Ensure`, so
//! `from_create_params` never fails. All business rules live in `handle_action`.

use super::actions::CartAction;
use super::error::CartError;
use super::{CartContext, MAX_LINE_QUANTITY};
use crate::model::{Cart, CartCreate, CartItem, CartItemId, UserId};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use tracing::debug;

fn validate_quantity(quantity: u32) -> Result<(), CartError> {
    if quantity == 0 || quantity > MAX_LINE_QUANTITY {
        return Err(CartError::InvalidQuantity(format!(
            "quantity must be between 1 and {MAX_LINE_QUANTITY}, got {quantity}"
        )));
    }
    Ok(())
}

impl Cart {
    fn item_mut(&mut self, id: CartItemId) -> Result<&mut CartItem, CartError> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| CartError::ItemNotFound(id.to_string()))
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = UserId;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = Cart;
    type Context = CartContext;
    type Error = CartError;

    async fn from_create_params(owner: UserId, _params: CartCreate, _ctx: &CartContext) -> Result<Self, CartError> {
        Ok(Cart::new(owner))
    }

    async fn on_update(&mut self, _update: (), _ctx: &CartContext) -> Result<(), CartError> {
        Ok(())
    }

    async fn handle_action(&mut self, action: CartAction, ctx: &CartContext) -> Result<Cart, CartError> {
        match action {
            CartAction::AddItem { meal_id, quantity } => {
                validate_quantity(quantity)?;
                let meal = ctx.catalog.find_meal(meal_id).await?;
                if !meal.available {
                    return Err(CartError::MealUnavailable(meal_id.to_string()));
                }

                match self.items.iter_mut().find(|item| item.meal_id == meal_id) {
                    Some(line) => {
                        let total = line.quantity.saturating_add(quantity);
                        validate_quantity(total)?;
                        line.quantity = total;
                        debug!(owner = %self.owner, %meal_id, total, "Incremented cart line");
                    }
                    None => {
                        let id = self.allocate_item_id();
                        self.items.push(CartItem {
                            id,
                            meal_id,
                            quantity,
                            unit_price: meal.price,
                            special_instructions: String::new(),
                        });
                        debug!(owner = %self.owner, %meal_id, item = %id, "Appended cart line");
                    }
                }
            }
            CartAction::UpdateItem {
                item_id,
                quantity,
                special_instructions,
            } => {
                validate_quantity(quantity)?;
                let line = self.item_mut(item_id)?;
                line.quantity = quantity;
                if let Some(instructions) = special_instructions {
                    line.special_instructions = instructions;
                }
            }
            CartAction::RemoveItem { item_id } => {
                let before = self.items.len();
                self.items.retain(|item| item.id != item_id);
                if self.items.len() == before {
                    return Err(CartError::ItemNotFound(item_id.to_string()));
                }
            }
            CartAction::Clear => {
                self.items.clear();
                self.promo = None;
            }
            CartAction::ApplyPromo { code } => {
                let promo = ctx
                    .promos
                    .lookup(&code)
                    .await
                    .ok_or_else(|| CartError::UnknownPromo(code.clone()))?;
                if !promo.is_active(Utc::now()) {
                    return Err(CartError::PromoExpired(promo.code));
                }
                self.promo = Some(promo);
            }
            CartAction::RemovePromo => {
                self.promo = None;
            }
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_actor::{Catalog, CatalogError};
    use crate::model::{MealId, MealInfo, PromoCode};
    use crate::promo::StaticPromoTable;
    use chrono::Duration;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct FixedCatalog(HashMap<MealId, MealInfo>);

    #[async_trait]
    impl Catalog for FixedCatalog {
        async fn find_meal(&self, id: MealId) -> Result<MealInfo, CatalogError> {
            self.0
                .get(&id)
                .cloned()
                .ok_or_else(|| CatalogError::meal_not_found(id))
        }
    }

    fn meal(id: u32, price: i64, available: bool) -> MealInfo {
        MealInfo {
            id: MealId(id),
            chef_id: UserId(100),
            name: format!("Meal {id}"),
            price: Decimal::new(price, 0),
            available,
            image: None,
        }
    }

    fn context() -> CartContext {
        let meals = [meal(1, 10, true), meal(2, 6, true), meal(3, 8, false)]
            .into_iter()
            .map(|m| (m.id, m))
            .collect();
        let mut promos = StaticPromoTable::builtin();
        promos.extend([PromoCode::new("GONE", 50, Utc::now() - Duration::days(1))]);
        CartContext {
            catalog: Arc::new(FixedCatalog(meals)),
            promos: Arc::new(promos),
        }
    }

    async fn cart_with(ctx: &CartContext, lines: &[(u32, u32)]) -> Cart {
        let mut cart = Cart::from_create_params(UserId(1), CartCreate, ctx).await.unwrap();
        for &(meal_id, quantity) in lines {
            cart.handle_action(
                CartAction::AddItem {
                    meal_id: MealId(meal_id),
                    quantity,
                },
                ctx,
            )
            .await
            .unwrap();
        }
        cart
    }

    #[tokio::test]
    async fn re_adding_a_meal_increments_and_keeps_price() {
        let ctx = context();
        let mut cart = cart_with(&ctx, &[(1, 2)]).await;
        let item_id = cart.items[0].id;
        cart.handle_action(
            CartAction::UpdateItem {
                item_id,
                quantity: 2,
                special_instructions: Some("no onions".into()),
            },
            &ctx,
        )
        .await
        .unwrap();

        let after = cart
            .handle_action(
                CartAction::AddItem {
                    meal_id: MealId(1),
                    quantity: 1,
                },
                &ctx,
            )
            .await
            .unwrap();

        assert_eq!(after.items.len(), 1);
        assert_eq!(after.items[0].quantity, 3);
        assert_eq!(after.items[0].unit_price, Decimal::new(10, 0));
        assert_eq!(after.items[0].special_instructions, "no onions");
        assert_eq!(after.total_price(), Decimal::new(30, 0));
    }

    #[tokio::test]
    async fn add_validates_quantity_and_meal() {
        let ctx = context();
        let mut cart = cart_with(&ctx, &[]).await;

        let zero = cart
            .handle_action(CartAction::AddItem { meal_id: MealId(1), quantity: 0 }, &ctx)
            .await;
        assert!(matches!(zero, Err(CartError::InvalidQuantity(_))));

        let missing = cart
            .handle_action(CartAction::AddItem { meal_id: MealId(9), quantity: 1 }, &ctx)
            .await;
        assert!(matches!(missing, Err(CartError::MealNotFound(_))));

        let unavailable = cart
            .handle_action(CartAction::AddItem { meal_id: MealId(3), quantity: 1 }, &ctx)
            .await;
        assert!(matches!(unavailable, Err(CartError::MealUnavailable(_))));
    }

    #[tokio::test]
    async fn line_quantity_is_capped() {
        let ctx = context();
        let mut cart = cart_with(&ctx, &[(1, MAX_LINE_QUANTITY)]).await;
        let result = cart
            .handle_action(CartAction::AddItem { meal_id: MealId(1), quantity: 1 }, &ctx)
            .await;
        assert!(matches!(result, Err(CartError::InvalidQuantity(_))));
    }

    #[tokio::test]
    async fn update_without_instructions_keeps_them() {
        let ctx = context();
        let mut cart = cart_with(&ctx, &[(2, 1)]).await;
        let item_id = cart.items[0].id;

        cart.handle_action(
            CartAction::UpdateItem {
                item_id,
                quantity: 1,
                special_instructions: Some("extra spicy".into()),
            },
            &ctx,
        )
        .await
        .unwrap();
        let after = cart
            .handle_action(
                CartAction::UpdateItem {
                    item_id,
                    quantity: 4,
                    special_instructions: None,
                },
                &ctx,
            )
            .await
            .unwrap();

        assert_eq!(after.items[0].quantity, 4);
        assert_eq!(after.items[0].special_instructions, "extra spicy");

        let cleared = cart
            .handle_action(
                CartAction::UpdateItem {
                    item_id,
                    quantity: 4,
                    special_instructions: Some(String::new()),
                },
                &ctx,
            )
            .await
            .unwrap();
        assert_eq!(cleared.items[0].special_instructions, "");
    }

    #[tokio::test]
    async fn unknown_lines_are_not_found() {
        let ctx = context();
        let mut cart = cart_with(&ctx, &[(1, 1)]).await;

        let update = cart
            .handle_action(
                CartAction::UpdateItem {
                    item_id: CartItemId(42),
                    quantity: 1,
                    special_instructions: None,
                },
                &ctx,
            )
            .await;
        assert!(matches!(update, Err(CartError::ItemNotFound(_))));

        let remove = cart
            .handle_action(CartAction::RemoveItem { item_id: CartItemId(42) }, &ctx)
            .await;
        assert!(matches!(remove, Err(CartError::ItemNotFound(_))));
    }

    #[tokio::test]
    async fn promo_rules() {
        let ctx = context();
        let mut cart = cart_with(&ctx, &[(1, 3)]).await;

        let unknown = cart
            .handle_action(CartAction::ApplyPromo { code: "NOPE".into() }, &ctx)
            .await;
        assert!(matches!(unknown, Err(CartError::UnknownPromo(_))));

        let expired = cart
            .handle_action(CartAction::ApplyPromo { code: "gone".into() }, &ctx)
            .await;
        assert!(matches!(expired, Err(CartError::PromoExpired(_))));

        let applied = cart
            .handle_action(CartAction::ApplyPromo { code: "welcome10".into() }, &ctx)
            .await
            .unwrap();
        let discount = applied.pricing(Utc::now()).discount.unwrap();
        assert_eq!(discount.final_price, Decimal::new(27, 0));

        let replaced = cart
            .handle_action(CartAction::ApplyPromo { code: "SAVE20".into() }, &ctx)
            .await
            .unwrap();
        assert_eq!(replaced.promo.unwrap().code, "SAVE20");

        let removed = cart.handle_action(CartAction::RemovePromo, &ctx).await.unwrap();
        assert!(removed.promo.is_none());
    }

    #[tokio::test]
    async fn clear_drops_items_and_promo() {
        let ctx = context();
        let mut cart = cart_with(&ctx, &[(1, 1), (2, 2)]).await;
        cart.handle_action(CartAction::ApplyPromo { code: "SAVE20".into() }, &ctx)
            .await
            .unwrap();

        let cleared = cart.handle_action(CartAction::Clear, &ctx).await.unwrap();
        assert!(cleared.items.is_empty());
        assert!(cleared.promo.is_none());
        assert_eq!(cleared.total_price(), Decimal::ZERO);
    }
}
