//! Error types for the stock actor.

use crate::model::LedgerError;
use thiserror::Error;

/// Errors that can occur during stock operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StockError {
    /// The requested item was not found.
    #[error("Stock item not found: {0}")]
    NotFound(String),

    /// An outgoing movement exceeds the current balance.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// Movement quantities must be positive.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Stock item code already registered: {0}")]
    DuplicateCode(String),

    #[error("Stock balance would overflow")]
    BalanceOverflow,

    #[error("Stock validation error: {0}")]
    Validation(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<LedgerError> for StockError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::InvalidQuantity(q) => StockError::InvalidQuantity(q),
            LedgerError::InsufficientBalance {
                requested,
                available,
            } => StockError::InsufficientStock {
                requested,
                available,
            },
            LedgerError::BalanceOverflow => StockError::BalanceOverflow,
        }
    }
}
