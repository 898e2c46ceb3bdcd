use crate::model::money::{line_total, percent_of};
use crate::model::{MealId, PromoCode, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a line inside one cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(pub u32);

impl From<u32> for CartItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// One line of a cart. `unit_price` is captured when the meal is first added and
/// never follows later catalog price changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: CartItemId,
    pub meal_id: MealId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub special_instructions: String,
}

/// A user's cart. There is exactly one per user and it is keyed by the owner's id.
///
/// # Actor Framework
/// Managed by the cart actor, see [`crate::cart_actor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub owner: UserId,
    /// Insertion order.
    pub items: Vec<CartItem>,
    pub promo: Option<PromoCode>,
    pub(crate) next_item_id: u32,
}

/// Parameters for building an empty cart. The owner is the record id.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartCreate;

/// Derived totals of a cart at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct CartPricing {
    pub subtotal: Decimal,
    /// Present only while the applied promo is active.
    pub discount: Option<Discount>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Discount {
    pub code: String,
    pub percent: u32,
    pub amount: Decimal,
    pub final_price: Decimal,
}

impl Cart {
    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            items: Vec::new(),
            promo: None,
            next_item_id: 1,
        }
    }

    /// Σ(unit_price × quantity) over the current lines.
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| line_total(item.unit_price, item.quantity))
            .sum()
    }

    /// Subtotal and, while the promo is active at `now`, the discount applied to it.
    pub fn pricing(&self, now: DateTime<Utc>) -> CartPricing {
        let subtotal = self.total_price();
        let discount = self
            .promo
            .as_ref()
            .filter(|promo| promo.is_active(now))
            .map(|promo| {
                let amount = percent_of(subtotal, promo.discount_percent);
                Discount {
                    code: promo.code.clone(),
                    percent: promo.discount_percent,
                    amount,
                    final_price: subtotal - amount,
                }
            });
        CartPricing { subtotal, discount }
    }

    pub(crate) fn allocate_item_id(&mut self) -> CartItemId {
        let id = CartItemId(self.next_item_id);
        self.next_item_id += 1;
        id
    }
}
