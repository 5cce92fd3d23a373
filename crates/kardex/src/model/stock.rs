/// A stock item and its ledger.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
///
/// See [`impl ActorEntity for StockItem`](#impl-ActorEntity-for-StockItem) for details on:
/// - Creation parameters ([`StockItemCreate`](crate::model::StockItemCreate))
/// - Update parameters ([`StockItemUpdate`](crate::model::StockItemUpdate))
/// - Custom actions ([`StockAction`](crate::stock_actor::actions::StockAction))
use crate::model::Kardex;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for stock items.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StockItemId(pub u32);

impl From<u32> for StockItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for StockItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// Fiscal classification, carried as opaque strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxClassification {
    pub ncm: Option<String>,
    pub cest: Option<String>,
    pub cfop: Option<String>,
    pub cst: Option<String>,
    pub origin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItem {
    pub id: StockItemId,
    pub code: String,
    pub name: String,
    /// On-hand quantity. Always equal to the ledger balance.
    pub quantity: u32,
    pub reorder_level: u32,
    pub price: Decimal,
    pub cost: Decimal,
    pub location: Option<String>,
    pub tax: TaxClassification,
    pub kardex: Kardex,
    pub created_at: DateTime<Utc>,
}

impl StockItem {
    pub fn needs_reorder(&self) -> bool {
        self.quantity <= self.reorder_level
    }

    /// Quantity valued at cost.
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.quantity) * self.cost
    }
}

/// Payload for registering a stock item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItemCreate {
    pub code: String,
    pub name: String,
    /// Written to the ledger as the opening entry when non-zero.
    pub initial_quantity: u32,
    pub reorder_level: u32,
    pub price: Decimal,
    pub cost: Decimal,
    pub location: Option<String>,
    pub tax: TaxClassification,
}

impl StockItemCreate {
    /// Minimal payload; the remaining fields default to empty / zero.
    pub fn new(code: impl Into<String>, name: impl Into<String>, initial_quantity: u32) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            initial_quantity,
            reorder_level: 0,
            price: Decimal::ZERO,
            cost: Decimal::ZERO,
            location: None,
            tax: TaxClassification::default(),
        }
    }
}

// Quantity is absent on purpose: it only changes through ledger movements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockItemUpdate {
    pub code: Option<String>,
    pub name: Option<String>,
    pub reorder_level: Option<u32>,
    pub price: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub location: Option<String>,
    pub tax: Option<TaxClassification>,
}
