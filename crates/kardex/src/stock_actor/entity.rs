//! [`ActorEntity`] implementation for [`StockItem`].
//!
//! The on-hand quantity is a cache of the ledger balance and is only ever written from
//! [`Kardex::append`]'s result.

use super::actions::{StockAction, StockActionResult};
use super::error::StockError;
use crate::model::{
    Kardex, MovementDraft, StockItem, StockItemCreate, StockItemId, StockItemUpdate,
};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use rust_decimal::Decimal;
use tracing::debug;

fn validate_code(code: &str) -> Result<(), StockError> {
    if code.trim().is_empty() {
        return Err(StockError::Validation("code must not be empty".into()));
    }
    Ok(())
}

fn validate_amount(field: &str, value: Decimal) -> Result<(), StockError> {
    if value.is_sign_negative() {
        return Err(StockError::Validation(format!("{field} must not be negative")));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for StockItem {
    type Id = StockItemId;
    type Create = StockItemCreate;
    type Update = StockItemUpdate;
    type Action = StockAction;
    type ActionResult = StockActionResult;
    type Context = ();
    type Error = StockError;

    /// Builds the item and writes the opening entry for a non-zero initial quantity.
    fn from_create_params(id: StockItemId, params: StockItemCreate) -> Result<Self, StockError> {
        validate_code(&params.code)?;
        validate_amount("price", params.price)?;
        validate_amount("cost", params.cost)?;

        let mut kardex = Kardex::new(id.clone());
        if params.initial_quantity > 0 {
            kardex.append(
                MovementDraft::entry(params.initial_quantity).with_note("Saldo inicial"),
            )?;
        }

        Ok(Self {
            id,
            code: params.code.trim().to_string(),
            name: params.name,
            quantity: kardex.balance(),
            reorder_level: params.reorder_level,
            price: params.price,
            cost: params.cost,
            location: params.location,
            tax: params.tax,
            kardex,
            created_at: Utc::now(),
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.code.clone())
    }

    async fn on_update(&mut self, update: StockItemUpdate, _ctx: &()) -> Result<(), StockError> {
        if let Some(code) = update.code {
            validate_code(&code)?;
            self.code = code.trim().to_string();
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(level) = update.reorder_level {
            self.reorder_level = level;
        }
        if let Some(price) = update.price {
            validate_amount("price", price)?;
            self.price = price;
        }
        if let Some(cost) = update.cost {
            validate_amount("cost", cost)?;
            self.cost = cost;
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
        if let Some(tax) = update.tax {
            self.tax = tax;
        }
        Ok(())
    }

    /// # Actions
    /// - `CheckStock`: on-hand quantity
    /// - `Record`: ledger append, quantity follows the new balance
    /// - `Movements`: filtered ledger read
    async fn handle_action(
        &mut self,
        action: StockAction,
        _ctx: &(),
    ) -> Result<StockActionResult, StockError> {
        match action {
            StockAction::CheckStock => Ok(StockActionResult::CheckStock(self.quantity)),
            StockAction::Record(draft) => {
                let movement = self.kardex.append(draft)?.clone();
                self.quantity = movement.balance;
                debug!(item = %self.id, kind = %movement.kind, balance = movement.balance, "Kardex append");
                Ok(StockActionResult::Record(movement))
            }
            StockAction::Movements(filter) => {
                Ok(StockActionResult::Movements(self.kardex.query(&filter)))
            }
        }
    }
}
