//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, plus a box for the entity's own error type.

/// Errors that can occur within the actor framework.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Duplicate key: {0}")]
    Conflict(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Borrow the boxed entity error as its concrete type, if it is one.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            FrameworkError::EntityError(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Take the boxed entity error out as its concrete type.
    ///
    /// Returns `Err(self)` untouched when this is a plumbing error or a different entity type,
    /// so callers can fall through to their generic mapping.
    pub fn into_entity<E: std::error::Error + 'static>(self) -> Result<E, Self> {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(e) => Ok(*e),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}
