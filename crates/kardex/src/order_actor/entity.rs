//! [`ActorEntity`] implementation for [`Order`].
//!
//! See the [module docs](super) for the intake saga.

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use super::OrderContext;
use crate::clients::StockClient;
use crate::model::{
    MovementDraft, Order, OrderCreate, OrderId, OrderLine, OrderStatus, OrderUpdate,
};
use crate::stock_actor::StockError;
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

const INTAKE_REVERSAL_NOTE: &str = "Estorno de pedido não concluído";
const CANCEL_NOTE: &str = "Cancelamento de pedido";
const CANCEL_REVERSAL_NOTE: &str = "Estorno de cancelamento";

fn line_error(line: &OrderLine, e: StockError) -> OrderError {
    match e {
        StockError::NotFound(_) => OrderError::InvalidItem(line.item_id.to_string()),
        StockError::InsufficientStock {
            requested,
            available,
        } => OrderError::InsufficientStock {
            item: line.item_id.to_string(),
            requested,
            available,
        },
        StockError::InvalidQuantity(q) => {
            OrderError::Validation(format!("invalid quantity {q} for {}", line.item_id))
        }
        other => OrderError::Stock(other.to_string()),
    }
}

/// Returns issued lines to stock. Failures are logged; the caller's error stands.
async fn return_lines(stock: &StockClient, lines: &[OrderLine], reference: &str, note: &str) {
    for line in lines {
        if let Err(e) = stock
            .receive_with_note(line.item_id.clone(), line.quantity, reference, note)
            .await
        {
            error!(order = reference, item = %line.item_id, quantity = line.quantity, error = %e, "Compensation failed");
        }
    }
    if !lines.is_empty() {
        let items: Vec<String> = lines.iter().map(|l| l.item_id.to_string()).collect();
        warn!(order = reference, compensated = ?items, "Stock returned");
    }
}

/// Takes issued lines out again after a failed cancellation.
async fn reissue_lines(stock: &StockClient, lines: &[OrderLine], reference: &str) {
    for line in lines {
        let draft = MovementDraft::exit(line.quantity)
            .with_reference(reference)
            .with_note(CANCEL_REVERSAL_NOTE);
        if let Err(e) = stock.record(line.item_id.clone(), draft).await {
            error!(order = reference, item = %line.item_id, error = %e, "Cancellation reversal failed");
        }
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = OrderContext;
    type Error = OrderError;

    /// Validates the payload. Stock and numbering are handled in `on_create`.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.buyer.trim().is_empty() {
            return Err(OrderError::Validation("buyer must not be empty".into()));
        }
        if params.lines.is_empty() {
            return Err(OrderError::Validation("order has no lines".into()));
        }
        if let Some(line) = params.lines.iter().find(|l| l.quantity == 0) {
            return Err(OrderError::Validation(format!(
                "zero quantity for {}",
                line.item_id
            )));
        }
        if let Some(line) = params.lines.iter().find(|l| l.unit_price < Decimal::ZERO) {
            return Err(OrderError::Validation(format!(
                "negative price for {}",
                line.item_id
            )));
        }

        Ok(Self {
            id,
            number: String::new(),
            buyer: params.buyer.trim().to_string(),
            salesperson: params.salesperson,
            total: Order::compute_total(&params.lines),
            lines: params.lines,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            notes: params.notes,
        })
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        let reference = self.reference();

        let mut issued: Vec<OrderLine> = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            match ctx
                .stock
                .issue(line.item_id.clone(), line.quantity, &reference)
                .await
            {
                Ok(_) => issued.push(line.clone()),
                Err(e) => {
                    warn!(order = %self.id, item = %line.item_id, error = %e, "Line rejected");
                    return_lines(&ctx.stock, &issued, &reference, INTAKE_REVERSAL_NOTE).await;
                    return Err(line_error(line, e));
                }
            }
        }

        match ctx.numbering.next().await {
            Ok(number) => self.number = number,
            Err(e) => {
                warn!(order = %self.id, error = %e, "Numbering failed");
                return_lines(&ctx.stock, &issued, &reference, INTAKE_REVERSAL_NOTE).await;
                return Err(OrderError::Numbering(e.to_string()));
            }
        }

        info!(order = %self.id, number = %self.number, total = %self.total, "Order placed");
        Ok(())
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &OrderContext) -> Result<(), OrderError> {
        if let Some(buyer) = update.buyer {
            if buyer.trim().is_empty() {
                return Err(OrderError::Validation("buyer must not be empty".into()));
            }
            self.buyer = buyer.trim().to_string();
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &OrderContext) -> Result<(), OrderError> {
        Err(OrderError::DeletionNotAllowed(self.id.to_string()))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::SetStatus(next) => {
                let from = self.status;
                if !from.can_transition_to(next) {
                    return Err(OrderError::InvalidTransition { from, to: next });
                }

                if next == OrderStatus::Cancelled {
                    let reference = self.reference();
                    let mut returned: Vec<OrderLine> = Vec::with_capacity(self.lines.len());
                    for line in &self.lines {
                        match ctx
                            .stock
                            .receive_with_note(line.item_id.clone(), line.quantity, &reference, CANCEL_NOTE)
                            .await
                        {
                            Ok(_) => returned.push(line.clone()),
                            Err(e) => {
                                warn!(order = %self.id, item = %line.item_id, error = %e, "Cancellation failed");
                                reissue_lines(&ctx.stock, &returned, &reference).await;
                                return Err(line_error(line, e));
                            }
                        }
                    }
                }

                self.status = next;
                info!(order = %self.id, %from, to = %next, "Status changed");
                Ok(OrderActionResult::SetStatus(from))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EmployeeId, StockItemId};
    use rust_decimal_macros::dec;

    fn params(lines: Vec<OrderLine>) -> OrderCreate {
        OrderCreate {
            buyer: "Comercial Souza".into(),
            salesperson: EmployeeId(1),
            lines,
            notes: None,
        }
    }

    #[test]
    fn empty_and_zero_quantity_orders_are_rejected() {
        assert!(matches!(
            Order::from_create_params(OrderId(1), params(vec![])),
            Err(OrderError::Validation(_))
        ));
        assert!(matches!(
            Order::from_create_params(
                OrderId(1),
                params(vec![OrderLine::new(StockItemId(1), 0, dec!(1))])
            ),
            Err(OrderError::Validation(_))
        ));
    }

    #[test]
    fn new_order_is_pending_with_derived_total() {
        let order = Order::from_create_params(
            OrderId(7),
            params(vec![
                OrderLine::new(StockItemId(1), 2, dec!(3.50)),
                OrderLine::new(StockItemId(2), 1, dec!(1.00)),
            ]),
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, dec!(8.00));
        assert_eq!(order.reference(), "order_7");
        assert!(order.number.is_empty());
    }

    #[test]
    fn stock_errors_map_to_line_errors() {
        let line = OrderLine::new(StockItemId(3), 5, dec!(1));
        assert_eq!(
            line_error(&line, StockError::NotFound("item_3".into())),
            OrderError::InvalidItem("item_3".into())
        );
        assert_eq!(
            line_error(
                &line,
                StockError::InsufficientStock {
                    requested: 5,
                    available: 3
                }
            ),
            OrderError::InsufficientStock {
                item: "item_3".into(),
                requested: 5,
                available: 3
            }
        );
    }
}
