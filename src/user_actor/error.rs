use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::FieldMessage;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error(
        "User validation error: {}",
        .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    )]
    Validation(Vec<FieldMessage>),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for UserError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            FrameworkError::Rejected(msg) => UserError::Validation(vec![FieldMessage::new("user", msg)]),
            other => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}
