//! Error types for the order actor.

use crate::model::OrderStatus;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// A line refers to a stock item that does not exist.
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// A line asks for more than the item has on hand.
    #[error("Insufficient stock for {item}: requested {requested}, available {available}")]
    InsufficientStock {
        item: String,
        requested: u32,
        available: u32,
    },

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    Validation(String),

    #[error("Order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Orders cannot be deleted: {0}")]
    DeletionNotAllowed(String),

    /// No order number could be minted.
    #[error("Order numbering failed: {0}")]
    Numbering(String),

    /// The stock actor failed for a reason other than the ones above.
    #[error("Stock operation failed: {0}")]
    Stock(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
