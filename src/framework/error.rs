//! # Framework Errors

/// Errors raised by the actor plumbing itself, as opposed to the resources it manages.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the resource's own error type from an [`FrameworkError::EntityError`].
    ///
    /// Anything that is not an entity error of type `E` is handed to `fallback`, which is how
    /// clients turn channel failures into their `Unavailable` variant.
    pub fn into_entity_error<E>(self, fallback: impl FnOnce(FrameworkError) -> E) -> E
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(e) => *e,
                Err(other) => fallback(FrameworkError::EntityError(other)),
            },
            other => fallback(other),
        }
    }
}
