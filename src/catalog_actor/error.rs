//! Error types for the catalog actor.

use crate::model::MealId;
use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The requested meal was not found.
    #[error("Meal not found: {0}")]
    NotFound(String),

    /// The listing data provided is invalid.
    #[error("Invalid meal: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CatalogError {
    pub fn meal_not_found(id: MealId) -> Self {
        CatalogError::NotFound(id.to_string())
    }
}

impl From<FrameworkError<CatalogError>> for CatalogError {
    fn from(e: FrameworkError<CatalogError>) -> Self {
        match e {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => CatalogError::NotFound(id),
            other => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }
}
