use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Code already registered: {0}")]
    DuplicateCode(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
