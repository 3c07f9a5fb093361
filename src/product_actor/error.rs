use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during product catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Product is in use: {0}")]
    Conflict(String),
    #[error("Product validation error: {0}")]
    Validation(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ProductError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            e @ FrameworkError::IntegrityViolation { .. } => ProductError::Conflict(e.to_string()),
            FrameworkError::Rejected(msg) => ProductError::Validation(msg),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}
