//! The Kardex: a per-item, append-only ledger of stock movements.
//!
//! Every movement carries the balance the item had right after it was applied, so the ledger
//! can be read as a running stock card without replaying it. [`Kardex::append`] is the only way
//! to add a row and there is no way to edit or remove one.

use crate::model::StockItemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Direction of a manual stock correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentDirection {
    Increase,
    Decrease,
}

/// What a movement does to the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Goods received. Adds to the balance.
    Entry,
    /// Goods issued. Subtracts, never below zero.
    Exit,
    /// Inventory-count correction in either direction.
    Adjustment(AdjustmentDirection),
    /// Planned movement. Recorded for planning, balance unchanged.
    Forecast,
}

impl MovementKind {
    /// Balance after applying `quantity` to `balance`, or the reason it cannot be applied.
    pub fn apply(self, balance: u32, quantity: u32) -> Result<u32, LedgerError> {
        let shortfall = || LedgerError::InsufficientBalance {
            requested: quantity,
            available: balance,
        };
        match self {
            MovementKind::Entry | MovementKind::Adjustment(AdjustmentDirection::Increase) => balance
                .checked_add(quantity)
                .ok_or(LedgerError::BalanceOverflow),
            MovementKind::Exit | MovementKind::Adjustment(AdjustmentDirection::Decrease) => {
                balance.checked_sub(quantity).ok_or_else(shortfall)
            }
            MovementKind::Forecast => Ok(balance),
        }
    }

    /// The movement that undoes this one. Forecasts have nothing to undo.
    pub fn reversal(self) -> Option<MovementKind> {
        match self {
            MovementKind::Entry => Some(MovementKind::Exit),
            MovementKind::Exit => Some(MovementKind::Entry),
            MovementKind::Adjustment(AdjustmentDirection::Increase) => {
                Some(MovementKind::Adjustment(AdjustmentDirection::Decrease))
            }
            MovementKind::Adjustment(AdjustmentDirection::Decrease) => {
                Some(MovementKind::Adjustment(AdjustmentDirection::Increase))
            }
            MovementKind::Forecast => None,
        }
    }
}

impl Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MovementKind::Entry => "Entrada",
            MovementKind::Exit => "Saída",
            MovementKind::Adjustment(AdjustmentDirection::Increase) => "Ajuste (+)",
            MovementKind::Adjustment(AdjustmentDirection::Decrease) => "Ajuste (-)",
            MovementKind::Forecast => "Previsão",
        };
        f.write_str(label)
    }
}

/// One immutable ledger row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    /// Position in the item's ledger, starting at 1.
    pub seq: u32,
    pub item_id: StockItemId,
    pub kind: MovementKind,
    pub quantity: u32,
    /// Balance right after this movement.
    pub balance: u32,
    pub at: DateTime<Utc>,
    /// Document that caused the movement (an order, an invoice).
    pub reference: Option<String>,
    pub note: Option<String>,
}

/// A movement to be appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementDraft {
    pub kind: MovementKind,
    pub quantity: u32,
    pub reference: Option<String>,
    pub note: Option<String>,
}

impl MovementDraft {
    pub fn new(kind: MovementKind, quantity: u32) -> Self {
        Self {
            kind,
            quantity,
            reference: None,
            note: None,
        }
    }

    pub fn entry(quantity: u32) -> Self {
        Self::new(MovementKind::Entry, quantity)
    }

    pub fn exit(quantity: u32) -> Self {
        Self::new(MovementKind::Exit, quantity)
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Selects movements out of a ledger. Empty filter selects everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub kind: Option<MovementKind>,
}

impl MovementFilter {
    pub fn matches(&self, movement: &Movement) -> bool {
        self.from.map_or(true, |from| movement.at >= from)
            && self.to.map_or(true, |to| movement.at <= to)
            && self.kind.map_or(true, |kind| movement.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientBalance { requested: u32, available: u32 },

    #[error("Balance would overflow")]
    BalanceOverflow,
}

/// The ledger of one stock item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kardex {
    item_id: StockItemId,
    movements: Vec<Movement>,
}

impl Kardex {
    pub fn new(item_id: StockItemId) -> Self {
        Self {
            item_id,
            movements: Vec::new(),
        }
    }

    /// Balance after the most recent movement; zero for an empty ledger.
    pub fn balance(&self) -> u32 {
        self.movements.last().map_or(0, |m| m.balance)
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    /// Appends a movement computed against the latest balance.
    ///
    /// Timestamps never go backwards within a ledger: a clock step back is absorbed by
    /// reusing the previous row's timestamp.
    pub fn append(&mut self, draft: MovementDraft) -> Result<&Movement, LedgerError> {
        if draft.quantity == 0 {
            return Err(LedgerError::InvalidQuantity(draft.quantity));
        }
        let balance = draft.kind.apply(self.balance(), draft.quantity)?;
        let now = Utc::now();
        let at = self.movements.last().map_or(now, |last| last.at.max(now));

        self.movements.push(Movement {
            seq: self.movements.len() as u32 + 1,
            item_id: self.item_id.clone(),
            kind: draft.kind,
            quantity: draft.quantity,
            balance,
            at,
            reference: draft.reference,
            note: draft.note,
        });
        Ok(&self.movements[self.movements.len() - 1])
    }

    pub fn query(&self, filter: &MovementFilter) -> Vec<Movement> {
        self.movements
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect()
    }
}
