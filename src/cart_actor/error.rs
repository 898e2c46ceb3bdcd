//! Error types for the cart actor.

use crate::catalog_actor::CatalogError;
use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// Quantity outside `1..=MAX_LINE_QUANTITY`.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// The user has no cart.
    #[error("Cart not found: {0}")]
    CartNotFound(String),

    /// No line with this id in the cart.
    #[error("Cart item not found: {0}")]
    ItemNotFound(String),

    #[error("Meal not found: {0}")]
    MealNotFound(String),

    #[error("Meal is not available: {0}")]
    MealUnavailable(String),

    #[error("Invalid promo code: {0}")]
    UnknownPromo(String),

    #[error("Promo code has expired: {0}")]
    PromoExpired(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<CartError>> for CartError {
    fn from(e: FrameworkError<CartError>) -> Self {
        match e {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(owner) => CartError::CartNotFound(owner),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<CatalogError> for CartError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(meal) => CartError::MealNotFound(meal),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}
