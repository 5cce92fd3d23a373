//! # Counter Actor
//!
//! Named sequences. `Next` reads and increments inside the actor loop, so two callers can
//! never be handed the same value. Order numbers are minted from the `orders` counter by
//! [`OrderNumbering`](crate::clients::OrderNumbering).

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Counter;
use resource_actor::{ResourceActor, ResourceClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    /// Increment and return the new value.
    Next,
    /// Last value handed out, without incrementing.
    Current,
}

/// Results from CounterActions - variants match 1:1 with CounterAction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterActionResult {
    Next(u64),
    Current(u64),
}

/// Creates a new counter actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Counter>, ResourceClient<Counter>) {
    ResourceActor::new(buffer_size)
}
