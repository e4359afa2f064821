//! # Framework Errors
//!
//! Common error type shared by every actor and client. Entity-specific failures
//! travel inside [`FrameworkError::EntityError`] and can be recovered with
//! [`FrameworkError::entity_error`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("No shards configured")]
    NoShards,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Returns the typed entity error carried by this value, if it is one of `E`.
    ///
    /// Domain clients use this to hand their own error enum back to callers
    /// instead of a stringified copy.
    pub fn entity_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, thiserror::Error)]
    #[error("box is sealed")]
    struct SealedError;

    #[test]
    fn test_entity_error_downcasts_to_original_type() {
        let err = FrameworkError::EntityError(Box::new(SealedError));
        assert_eq!(err.entity_error::<SealedError>(), Some(&SealedError));
        assert!(err.entity_error::<std::io::Error>().is_none());
    }

    #[test]
    fn test_entity_error_is_none_for_transport_failures() {
        assert!(FrameworkError::ActorClosed
            .entity_error::<SealedError>()
            .is_none());
    }
}
