//! Error types for the Order actor.

use crate::catalog_actor::CatalogError;
use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// An order needs at least one item.
    #[error("No order items")]
    EmptyOrder,

    /// The meal of the first line item is not in the catalog.
    #[error("Meal not found: {0}")]
    MealNotFound(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The requester may not see or change this order.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<OrderError>> for OrderError {
    fn from(e: FrameworkError<OrderError>) -> Self {
        match e {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<CatalogError> for OrderError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(meal) => OrderError::MealNotFound(meal),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
