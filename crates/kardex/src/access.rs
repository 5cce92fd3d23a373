//! Sign-in and per-route role checks.
//!
//! [`Authenticator`] verifies a username and password against the employee collection.
//! [`RoutePolicy`] decides which roles may open which screen. Admins may open every route;
//! routes missing from the table are closed to everyone else.

use crate::clients::{hash_password, verify_password, EmployeeClient};
use crate::employee_actor::EmployeeError;
use crate::model::{EmployeeId, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// Unknown user, inactive user and wrong password all look the same to the caller.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Role {role} may not access {route}")]
    Forbidden { route: String, role: Role },

    #[error("Authentication unavailable: {0}")]
    Unavailable(String),
}

/// A signed-in employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub employee_id: EmployeeId,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub signed_in_at: DateTime<Utc>,
}

const PLACEHOLDER_PASSWORD: &str = "kardex-placeholder";

#[derive(Clone)]
pub struct Authenticator {
    employees: EmployeeClient,
    // Unknown and inactive users are checked against this hash, at the configured cost, so
    // every rejection runs exactly one bcrypt verify.
    placeholder_hash: Arc<OnceCell<String>>,
}

impl Authenticator {
    pub fn new(employees: EmployeeClient) -> Self {
        Self {
            employees,
            placeholder_hash: Arc::new(OnceCell::new()),
        }
    }

    async fn placeholder(&self) -> Result<String, EmployeeError> {
        let cost = self.employees.bcrypt_cost();
        self.placeholder_hash
            .get_or_try_init(|| hash_password(PLACEHOLDER_PASSWORD.to_string(), cost))
            .await
            .cloned()
    }

    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let employee = self
            .employees
            .find_by_username(username)
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        let Some(employee) = employee.filter(|e| e.active) else {
            let hash = self
                .placeholder()
                .await
                .map_err(|e| AuthError::Unavailable(e.to_string()))?;
            verify_password(password.to_string(), hash).await;
            warn!("Sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(password.to_string(), employee.password_hash.clone()).await {
            warn!("Sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        info!(employee = %employee.id, role = %employee.role, "Signed in");
        Ok(Session {
            employee_id: employee.id,
            username: employee.username,
            name: employee.name,
            role: employee.role,
            signed_in_at: Utc::now(),
        })
    }
}

/// Route path to allowed roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePolicy {
    rules: Vec<(String, Vec<Role>)>,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        use Role::*;
        Self::empty()
            .allow("/estoque", &[Manager, Stockist])
            .allow("/kardex", &[Manager, Stockist])
            .allow("/fornecedores", &[Manager, Stockist])
            .allow("/pedidos", &[Manager, Seller])
            .allow("/comissoes", &[Manager, Seller])
            .allow("/relatorios", &[Manager])
            .allow("/status", &[Manager])
            .allow("/funcionarios", &[])
    }
}

impl RoutePolicy {
    /// A policy that only lets admins in.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds or replaces the rule for `route`.
    pub fn allow(mut self, route: &str, roles: &[Role]) -> Self {
        let route = route.trim_end_matches('/').to_string();
        self.rules.retain(|(r, _)| *r != route);
        self.rules.push((route, roles.to_vec()));
        self
    }

    /// Longest rule that is `path` itself or a parent segment of it.
    fn rule_for(&self, path: &str) -> Option<&[Role]> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        self.rules
            .iter()
            .filter(|(route, _)| {
                path.strip_prefix(route.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            })
            .max_by_key(|(route, _)| route.len())
            .map(|(_, roles)| roles.as_slice())
    }

    pub fn is_allowed(&self, role: Role, path: &str) -> bool {
        if role == Role::Admin {
            return true;
        }
        self.rule_for(path)
            .is_some_and(|roles| roles.contains(&role))
    }

    pub fn authorize(&self, session: &Session, path: &str) -> Result<(), AuthError> {
        if self.is_allowed(session.role, path) {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                route: path.to_string(),
                role: session.role,
            })
        }
    }
}
