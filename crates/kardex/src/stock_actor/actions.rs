//! Custom actions for the stock actor.
//!
//! Everything that touches the on-hand quantity goes through [`StockAction::Record`], which
//! appends to the item's Kardex.

use crate::model::{Movement, MovementDraft, MovementFilter};

#[derive(Debug, Clone)]
pub enum StockAction {
    /// Current on-hand quantity.
    CheckStock,
    /// Append a movement and update the on-hand quantity from the new balance.
    ///
    /// # Errors
    /// Fails without writing anything when the quantity is zero or an outgoing movement
    /// exceeds the balance.
    Record(MovementDraft),
    /// Movements in append order, narrowed by the filter.
    Movements(MovementFilter),
}

/// Results from StockActions - variants match 1:1 with StockAction
#[derive(Debug, Clone)]
pub enum StockActionResult {
    CheckStock(u32),
    Record(Movement),
    Movements(Vec<Movement>),
}
