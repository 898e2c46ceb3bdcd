//! Error types for the account actor.

use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    /// The requested account was not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// The account data provided is invalid.
    #[error("Invalid account: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<AccountError>> for AccountError {
    fn from(e: FrameworkError<AccountError>) -> Self {
        match e {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => AccountError::NotFound(id),
            other => AccountError::ActorCommunicationError(other.to_string()),
        }
    }
}
