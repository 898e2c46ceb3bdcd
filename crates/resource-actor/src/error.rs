//! # Framework Errors

/// Errors surfaced by a [`ResourceClient`](crate::ResourceClient).
///
/// `E` is the entity's own error type. It travels back to the caller untouched in
/// [`FrameworkError::Entity`], so callers can still match on business failures.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError<E> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Entity(E),
}

impl<E> FrameworkError<E> {
    /// True for failures of the actor plumbing rather than of the request itself.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::ActorClosed | Self::ActorDropped)
    }
}
