//! # Employee Actor
//!
//! Staff accounts used for sign-in, route authorization and commissions. Passwords arrive at
//! the actor already hashed; see [`EmployeeClient::register`](crate::clients::EmployeeClient::register).

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Employee;
use resource_actor::{ResourceActor, ResourceClient};

#[derive(Clone)]
pub enum EmployeeAction {
    /// Replace the stored bcrypt hash.
    SetPasswordHash(String),
}

impl std::fmt::Debug for EmployeeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmployeeAction::SetPasswordHash(_) => f.write_str("SetPasswordHash(<redacted>)"),
        }
    }
}

/// Results from EmployeeActions - variants match 1:1 with EmployeeAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeActionResult {
    SetPasswordHash(()),
}

/// Creates a new employee actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Employee>, ResourceClient<Employee>) {
    ResourceActor::new(buffer_size)
}
