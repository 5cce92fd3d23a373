use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EmployeeError {
    #[error("Employee not found: {0}")]
    NotFound(String),

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Employee validation error: {0}")]
    Validation(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
