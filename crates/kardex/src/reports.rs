//! Read-only views computed from collection snapshots.
//!
//! Each function takes the records it needs, so the same code serves the live system
//! ([`KardexSystem`](crate::lifecycle::KardexSystem) fetches the lists) and tests.

use crate::model::{
    AdjustmentDirection, Employee, EmployeeId, Movement, MovementKind, Order, OrderStatus,
    StockItem, StockItemId,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockRow {
    pub item_id: StockItemId,
    pub code: String,
    pub name: String,
    pub quantity: u32,
    pub reorder_level: u32,
}

/// Items at or below their reorder level, emptiest first.
pub fn low_stock(items: &[StockItem]) -> Vec<LowStockRow> {
    let mut rows: Vec<LowStockRow> = items
        .iter()
        .filter(|item| item.needs_reorder())
        .map(|item| LowStockRow {
            item_id: item.id.clone(),
            code: item.code.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            reorder_level: item.reorder_level,
        })
        .collect();
    rows.sort_by_key(|row| (row.quantity, row.item_id.clone()));
    rows
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryValuation {
    pub items: usize,
    pub units: u64,
    /// Σ quantity × cost.
    pub at_cost: Decimal,
    /// Σ quantity × price.
    pub at_price: Decimal,
}

pub fn inventory_valuation(items: &[StockItem]) -> InventoryValuation {
    items
        .iter()
        .fold(InventoryValuation::default(), |mut total, item| {
            let quantity = Decimal::from(item.quantity);
            total.items += 1;
            total.units += u64::from(item.quantity);
            total.at_cost += quantity * item.cost;
            total.at_price += quantity * item.price;
            total
        })
}

/// Movement totals for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KardexSummary {
    pub movements: usize,
    pub entries: u64,
    pub exits: u64,
    pub adjustments_in: u64,
    pub adjustments_out: u64,
    pub forecasts: u64,
    pub closing_balance: u32,
}

impl KardexSummary {
    pub fn from_movements(movements: &[Movement]) -> Self {
        let mut summary = movements.iter().fold(Self::default(), |mut s, m| {
            let quantity = u64::from(m.quantity);
            match m.kind {
                MovementKind::Entry => s.entries += quantity,
                MovementKind::Exit => s.exits += quantity,
                MovementKind::Adjustment(AdjustmentDirection::Increase) => {
                    s.adjustments_in += quantity
                }
                MovementKind::Adjustment(AdjustmentDirection::Decrease) => {
                    s.adjustments_out += quantity
                }
                MovementKind::Forecast => s.forecasts += quantity,
            }
            s
        });
        summary.movements = movements.len();
        summary.closing_balance = movements.last().map_or(0, |m| m.balance);
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRow {
    pub employee_id: EmployeeId,
    pub name: String,
    pub orders: usize,
    pub sales: Decimal,
    pub rate: Decimal,
    /// `sales × rate`, rounded half-up to cents.
    pub commission: Decimal,
}

/// Per-salesperson commission over non-cancelled orders. Orders whose salesperson is not in
/// `employees` are left out.
pub fn commissions(orders: &[Order], employees: &[Employee]) -> Vec<CommissionRow> {
    let mut sales: BTreeMap<&EmployeeId, (usize, Decimal)> = BTreeMap::new();
    for order in orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
    {
        let entry = sales.entry(&order.salesperson).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += order.total;
    }

    employees
        .iter()
        .filter_map(|employee| {
            let (count, total) = sales.get(&employee.id)?;
            let commission = (*total * employee.commission_rate)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            Some(CommissionRow {
                employee_id: employee.id.clone(),
                name: employee.name.clone(),
                orders: *count,
                sales: *total,
                rate: employee.commission_rate,
                commission,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Kardex, MovementDraft, OrderId, OrderLine, Role, TaxClassification};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn item(id: u32, quantity: u32, reorder_level: u32, cost: Decimal) -> StockItem {
        StockItem {
            id: StockItemId(id),
            code: format!("C{id}"),
            name: format!("Item {id}"),
            quantity,
            reorder_level,
            price: cost * dec!(2),
            cost,
            location: None,
            tax: TaxClassification::default(),
            kardex: Kardex::new(StockItemId(id)),
            created_at: Utc::now(),
        }
    }

    fn order(id: u32, salesperson: u32, total: Decimal, status: OrderStatus) -> Order {
        Order {
            id: OrderId(id),
            number: format!("PED-{id:06}"),
            buyer: "Cliente".into(),
            salesperson: EmployeeId(salesperson),
            lines: vec![OrderLine::new(StockItemId(1), 1, total)],
            status,
            total,
            created_at: Utc::now(),
            notes: None,
        }
    }

    fn seller(id: u32, rate: Decimal) -> Employee {
        Employee {
            id: EmployeeId(id),
            name: format!("Vendedor {id}"),
            username: format!("v{id}"),
            password_hash: String::new(),
            role: Role::Seller,
            commission_rate: rate,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn low_stock_includes_threshold_and_sorts_emptiest_first() {
        let items = vec![
            item(1, 5, 5, dec!(1)),
            item(2, 10, 5, dec!(1)),
            item(3, 0, 2, dec!(1)),
        ];
        let ids: Vec<u32> = low_stock(&items).into_iter().map(|r| r.item_id.0).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn valuation_sums_quantity_times_cost() {
        let items = vec![item(1, 4, 0, dec!(2.50)), item(2, 3, 0, dec!(10))];
        let valuation = inventory_valuation(&items);
        assert_eq!(valuation.at_cost, dec!(40.00));
        assert_eq!(valuation.at_price, dec!(80.00));
        assert_eq!(valuation.units, 7);
        assert_eq!(valuation.items, 2);
    }

    #[test]
    fn kardex_summary_totals_by_kind() {
        let mut kardex = Kardex::new(StockItemId(1));
        kardex.append(MovementDraft::entry(10)).unwrap();
        kardex.append(MovementDraft::exit(4)).unwrap();
        kardex
            .append(MovementDraft::new(
                MovementKind::Adjustment(AdjustmentDirection::Increase),
                2,
            ))
            .unwrap();
        kardex
            .append(MovementDraft::new(MovementKind::Forecast, 7))
            .unwrap();

        let summary = KardexSummary::from_movements(kardex.movements());
        assert_eq!(summary.entries, 10);
        assert_eq!(summary.exits, 4);
        assert_eq!(summary.adjustments_in, 2);
        assert_eq!(summary.forecasts, 7);
        assert_eq!(summary.closing_balance, 8);
        assert_eq!(summary.movements, 4);
    }

    #[test]
    fn commissions_skip_cancelled_orders_and_round_to_cents() {
        let orders = vec![
            order(1, 1, dec!(100.10), OrderStatus::Pending),
            order(2, 1, dec!(33.35), OrderStatus::Delivered),
            order(3, 1, dec!(500), OrderStatus::Cancelled),
            order(4, 9, dec!(70), OrderStatus::Pending),
        ];
        let rows = commissions(&orders, &[seller(1, dec!(0.05)), seller(2, dec!(0.03))]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].orders, 2);
        assert_eq!(rows[0].sales, dec!(133.45));
        // 133.45 × 0.05 = 6.6725
        assert_eq!(rows[0].commission, dec!(6.67));
    }
}
