use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CounterError {
    #[error("Counter not found: {0}")]
    NotFound(String),

    #[error("Counter name already in use: {0}")]
    DuplicateName(String),

    #[error("Counter {0} is exhausted")]
    Exhausted(String),

    #[error("Counter validation error: {0}")]
    Validation(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
