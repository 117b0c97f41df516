//! # Framework Errors
//!
//! Errors produced by the actor plumbing itself. Entity-level failures travel
//! inside [`FrameworkError::EntityError`] and are recovered with
//! [`FrameworkError::downcast_entity`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the typed entity error carried by `EntityError`.
    ///
    /// Returns the original error untouched when it is a plumbing error or an
    /// entity error of a different type.
    pub fn downcast_entity<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(inner) => Err(FrameworkError::EntityError(inner)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of stock")]
    struct OutOfStock;

    #[test]
    fn downcast_recovers_entity_error() {
        let err = FrameworkError::EntityError(Box::new(OutOfStock));
        assert_eq!(err.downcast_entity::<OutOfStock>().unwrap(), OutOfStock);
    }

    #[test]
    fn downcast_keeps_plumbing_errors() {
        let err = FrameworkError::ActorClosed;
        assert!(matches!(
            err.downcast_entity::<OutOfStock>(),
            Err(FrameworkError::ActorClosed)
        ));
    }

    #[test]
    fn downcast_keeps_foreign_entity_errors() {
        let err = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        match err.downcast_entity::<OutOfStock>() {
            Err(FrameworkError::EntityError(inner)) => assert_eq!(inner.to_string(), "disk"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
