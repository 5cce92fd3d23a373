//! # Employee Client
//!
//! Staff registration and lookup. Passwords are hashed with bcrypt on the blocking pool before
//! anything is sent to the employee actor.
use crate::employee_actor::{EmployeeAction, EmployeeActionResult, EmployeeError};
use crate::model::{Employee, EmployeeCreate, EmployeeId, EmployeeUpdate, NewEmployee};
use async_trait::async_trait;
use bcrypt::DEFAULT_COST;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct EmployeeClient {
    inner: ResourceClient<Employee>,
    bcrypt_cost: u32,
}

impl EmployeeClient {
    pub fn new(inner: ResourceClient<Employee>) -> Self {
        Self::with_cost(inner, DEFAULT_COST)
    }

    /// Uses the given bcrypt work factor for new hashes.
    pub fn with_cost(inner: ResourceClient<Employee>, bcrypt_cost: u32) -> Self {
        Self { inner, bcrypt_cost }
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }
}

#[async_trait]
impl ActorClient<Employee> for EmployeeClient {
    type Error = EmployeeError;

    fn inner(&self) -> &ResourceClient<Employee> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<EmployeeError>() {
            Ok(e) => e,
            Err(FrameworkError::NotFound(id)) => EmployeeError::NotFound(id),
            Err(FrameworkError::Conflict(username)) => EmployeeError::DuplicateUsername(username),
            Err(other) => EmployeeError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// Hashes `password` on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, EmployeeError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| EmployeeError::Hashing(e.to_string()))?
        .map_err(|e| EmployeeError::Hashing(e.to_string()))
}

/// Checks `password` against a stored hash on the blocking pool. Malformed hashes verify as
/// false.
pub async fn verify_password(password: String, hash: String) -> bool {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}

impl EmployeeClient {
    #[instrument(skip(self), fields(username = %employee.username))]
    pub async fn register(&self, employee: NewEmployee) -> Result<EmployeeId, EmployeeError> {
        if employee.password.is_empty() {
            return Err(EmployeeError::Validation("password must not be empty".into()));
        }
        let password_hash = hash_password(employee.password, self.bcrypt_cost).await?;
        debug!("Sending request");
        self.inner
            .create(EmployeeCreate {
                name: employee.name,
                username: employee.username,
                password_hash,
                role: employee.role,
                commission_rate: employee.commission_rate,
            })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_employee(
        &self,
        id: EmployeeId,
        update: EmployeeUpdate,
    ) -> Result<Employee, EmployeeError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, password))]
    pub async fn change_password(&self, id: EmployeeId, password: String) -> Result<(), EmployeeError> {
        if password.is_empty() {
            return Err(EmployeeError::Validation("password must not be empty".into()));
        }
        let hash = hash_password(password, self.bcrypt_cost).await?;
        match self
            .inner
            .perform_action(id, EmployeeAction::SetPasswordHash(hash))
            .await
            .map_err(Self::map_error)?
        {
            EmployeeActionResult::SetPasswordHash(()) => Ok(()),
        }
    }

    /// Case-insensitive lookup by username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Employee>, EmployeeError> {
        let wanted = username.trim().to_lowercase();
        Ok(self.list().await?.into_iter().find(|e| e.username == wanted))
    }
}
