//! Cart mutations.
//!
//! Every action returns the cart as it stands afterwards. A failing action leaves the
//! stored cart unchanged.

use crate::model::{CartItemId, MealId};

#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds `quantity` of a meal. An existing line for the meal is incremented and keeps
    /// its price and instructions; otherwise a line is appended at the current price.
    AddItem { meal_id: MealId, quantity: u32 },
    /// Sets a line's quantity. Instructions change only when provided.
    UpdateItem {
        item_id: CartItemId,
        quantity: u32,
        special_instructions: Option<String>,
    },
    RemoveItem { item_id: CartItemId },
    /// Empties the cart and drops the promo.
    Clear,
    /// Applies a promo, replacing any previous one.
    ApplyPromo { code: String },
    RemovePromo,
}
