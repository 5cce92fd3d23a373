use crate::model::OrderStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Move the order to a new status. Cancelling returns the stock.
    SetStatus(OrderStatus),
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderActionResult {
    /// The status the order had before.
    SetStatus(OrderStatus),
}
