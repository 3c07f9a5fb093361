use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during category operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(String),
    #[error("Category validation error: {0}")]
    Validation(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CategoryError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => CategoryError::NotFound(id),
            FrameworkError::Rejected(msg) => CategoryError::Validation(msg),
            other => CategoryError::ActorCommunicationError(other.to_string()),
        }
    }
}
