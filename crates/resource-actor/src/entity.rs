//! # ActorEntity Trait
//!
//! The contract a record type implements to be stored by a [`ResourceActor`](crate::ResourceActor).
//! Associated types pin down the id, the DTOs, the actions and the error, so a cart
//! action can never be sent to the order store.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record must implement to be managed by `ResourceActor`.
///
/// All hooks are async and receive the actor's `Context`, the dependencies injected
/// through [`ResourceActor::run`](crate::ResourceActor::run).
///
/// Hooks that mutate (`on_update`, `handle_action`) are invoked on a working copy. If
/// they return an error the copy is discarded, so implementations may mutate `self`
/// freely before validating the rest of a request.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic id allocation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to build a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Record-specific operations.
    type Action: Send + Sync + Debug;

    /// The result returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error type per entity, returned unchanged to the caller inside
    /// [`FrameworkError::Entity`](crate::FrameworkError::Entity).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity for a freshly allocated (or caller-chosen) id.
    ///
    /// Validation and lookups against other actors belong here; an error means
    /// nothing is stored.
    async fn from_create_params(
        id: Self::Id,
        params: Self::Create,
        ctx: &Self::Context,
    ) -> Result<Self, Self::Error>;

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
