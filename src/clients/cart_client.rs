//! # Cart Client
//!
//! Provides a high-level API for interacting with the cart actor. Carts are addressed
//! by their owner's [`UserId`].

use crate::cart_actor::{CartAction, CartError};
use crate::model::{Cart, CartCreate, CartItemId, MealId, UserId};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    /// The user's cart, created empty if they have none. Never fails for a live actor.
    #[instrument(skip(self))]
    pub async fn get_or_create(&self, owner: UserId) -> Result<Cart, CartError> {
        debug!("Sending request");
        Ok(self.inner.ensure(owner, CartCreate).await?)
    }

    /// Adds a meal, creating the cart first when the user has none.
    #[instrument(skip(self))]
    pub async fn add_item(&self, owner: UserId, meal_id: MealId, quantity: u32) -> Result<Cart, CartError> {
        self.get_or_create(owner).await?;
        self.act(owner, CartAction::AddItem { meal_id, quantity }).await
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        owner: UserId,
        item_id: CartItemId,
        quantity: u32,
        special_instructions: Option<String>,
    ) -> Result<Cart, CartError> {
        self.act(
            owner,
            CartAction::UpdateItem {
                item_id,
                quantity,
                special_instructions,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, owner: UserId, item_id: CartItemId) -> Result<Cart, CartError> {
        self.act(owner, CartAction::RemoveItem { item_id }).await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, owner: UserId) -> Result<Cart, CartError> {
        self.act(owner, CartAction::Clear).await
    }

    #[instrument(skip(self))]
    pub async fn apply_promo(&self, owner: UserId, code: String) -> Result<Cart, CartError> {
        self.act(owner, CartAction::ApplyPromo { code }).await
    }

    #[instrument(skip(self))]
    pub async fn remove_promo(&self, owner: UserId) -> Result<Cart, CartError> {
        self.act(owner, CartAction::RemovePromo).await
    }

    async fn act(&self, owner: UserId, action: CartAction) -> Result<Cart, CartError> {
        debug!(?action, "Sending request");
        Ok(self.inner.perform_action(owner, action).await?)
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError<CartError>) -> Self::Error {
        e.into()
    }
}
