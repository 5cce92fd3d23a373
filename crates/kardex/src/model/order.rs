/// Represents a customer order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Status transitions ([`OrderAction`](crate::order_actor::OrderAction))
use crate::model::{EmployeeId, StockItemId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: StockItemId,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderLine {
    pub fn new(item_id: StockItemId, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            item_id,
            quantity,
            unit_price,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// Where an order is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Em andamento")]
    InProgress,
    #[serde(rename = "Enviado")]
    Shipped,
    #[serde(rename = "Entregue")]
    Delivered,
    #[serde(rename = "Cancelado")]
    Cancelled,
}

impl OrderStatus {
    /// Pendente → Em andamento → Enviado → Entregue, with Cancelado reachable until shipping.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress)
                | (InProgress, Shipped)
                | (Shipped, Delivered)
                | (Pending, Cancelled)
                | (InProgress, Cancelled)
        )
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Pending => "Pendente",
            OrderStatus::InProgress => "Em andamento",
            OrderStatus::Shipped => "Enviado",
            OrderStatus::Delivered => "Entregue",
            OrderStatus::Cancelled => "Cancelado",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-readable sequential number, e.g. `PED-000042`. Assigned during intake.
    pub number: String,
    pub buyer: String,
    pub salesperson: EmployeeId,
    pub lines: Vec<OrderLine>,
    pub status: OrderStatus,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl Order {
    /// Sum of the line subtotals.
    pub fn compute_total(lines: &[OrderLine]) -> Decimal {
        lines.iter().map(OrderLine::subtotal).sum()
    }

    /// Reference written on the ledger movements this order causes.
    pub fn reference(&self) -> String {
        self.id.to_string()
    }
}

/// Payload for placing a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub buyer: String,
    pub salesperson: EmployeeId,
    pub lines: Vec<OrderLine>,
    pub notes: Option<String>,
}

/// Lines and status are not editable; status moves through [`OrderAction`](crate::order_actor::OrderAction).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub buyer: Option<String>,
    pub notes: Option<String>,
}
