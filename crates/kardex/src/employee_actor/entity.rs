use super::error::EmployeeError;
use super::{EmployeeAction, EmployeeActionResult};
use crate::model::{Employee, EmployeeCreate, EmployeeId, EmployeeUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use rust_decimal::Decimal;

fn validate_rate(rate: Decimal) -> Result<Decimal, EmployeeError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(EmployeeError::Validation(format!(
            "commission rate {rate} outside 0..=1"
        )));
    }
    Ok(rate)
}

fn normalize_username(username: &str) -> Result<String, EmployeeError> {
    let username = username.trim().to_lowercase();
    if username.is_empty() || username.chars().any(char::is_whitespace) {
        return Err(EmployeeError::Validation(
            "username must be a single non-empty word".into(),
        ));
    }
    Ok(username)
}

#[async_trait]
impl ActorEntity for Employee {
    type Id = EmployeeId;
    type Create = EmployeeCreate;
    type Update = EmployeeUpdate;
    type Action = EmployeeAction;
    type ActionResult = EmployeeActionResult;
    type Context = ();
    type Error = EmployeeError;

    fn from_create_params(id: EmployeeId, params: EmployeeCreate) -> Result<Self, EmployeeError> {
        if params.password_hash.is_empty() {
            return Err(EmployeeError::Validation("missing password hash".into()));
        }
        Ok(Self {
            id,
            name: params.name,
            username: normalize_username(&params.username)?,
            password_hash: params.password_hash,
            role: params.role,
            commission_rate: validate_rate(params.commission_rate)?,
            active: true,
            created_at: Utc::now(),
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.username.clone())
    }

    async fn on_update(&mut self, update: EmployeeUpdate, _ctx: &()) -> Result<(), EmployeeError> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(rate) = update.commission_rate {
            self.commission_rate = validate_rate(rate)?;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: EmployeeAction,
        _ctx: &(),
    ) -> Result<EmployeeActionResult, EmployeeError> {
        match action {
            EmployeeAction::SetPasswordHash(hash) => {
                if hash.is_empty() {
                    return Err(EmployeeError::Validation("missing password hash".into()));
                }
                self.password_hash = hash;
                Ok(EmployeeActionResult::SetPasswordHash(()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use rust_decimal_macros::dec;

    fn params(username: &str, rate: Decimal) -> EmployeeCreate {
        EmployeeCreate {
            name: "Maria".into(),
            username: username.into(),
            password_hash: "$2b$04$placeholder".into(),
            role: Role::Seller,
            commission_rate: rate,
        }
    }

    #[test]
    fn username_is_normalized() {
        let e = Employee::from_create_params(EmployeeId(1), params("  Maria ", dec!(0.05))).unwrap();
        assert_eq!(e.username, "maria");
        assert_eq!(e.unique_key().as_deref(), Some("maria"));
        assert!(e.active);
    }

    #[test]
    fn invalid_rate_and_username_are_rejected() {
        assert!(Employee::from_create_params(EmployeeId(1), params("maria", dec!(1.5))).is_err());
        assert!(Employee::from_create_params(EmployeeId(1), params("ma ria", dec!(0.1))).is_err());
    }

    #[test]
    fn debug_output_hides_the_hash() {
        let e = Employee::from_create_params(EmployeeId(1), params("maria", dec!(0.05))).unwrap();
        assert!(!format!("{e:?}").contains("placeholder"));
        assert!(!format!("{:?}", EmployeeAction::SetPasswordHash("secret".into())).contains("secret"));
    }
}
