use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub u32);

impl From<u32> for EmployeeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "employee_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Seller,
    Stockist,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Seller => "seller",
            Role::Stockist => "stockist",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    /// Stored lowercase; unique across employees.
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    /// Fraction of the order total, e.g. `0.05` for 5%.
    pub commission_rate: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Employee")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("role", &self.role)
            .field("commission_rate", &self.commission_rate)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

/// Registration request as typed by an administrator. Hashed before it reaches the actor.
#[derive(Clone, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    pub commission_rate: Decimal,
}

impl std::fmt::Debug for NewEmployee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewEmployee")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("commission_rate", &self.commission_rate)
            .finish()
    }
}

/// Payload stored by the employee actor.
#[derive(Clone)]
pub struct EmployeeCreate {
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub commission_rate: Decimal,
}

impl std::fmt::Debug for EmployeeCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeCreate")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("role", &self.role)
            .field("commission_rate", &self.commission_rate)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub commission_rate: Option<Decimal>,
    pub active: Option<bool>,
}
