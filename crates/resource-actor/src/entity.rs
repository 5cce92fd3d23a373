//! # ActorEntity Trait
//!
//! The contract a record type implements to be owned by a [`ResourceActor`](crate::ResourceActor).
//! One actor owns one collection (stock items, orders, suppliers, ...). The associated types pin
//! down the payloads each collection accepts, so a `SupplierCreate` can never reach the stock
//! actor.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::unique_key`]
//! - [`ActorEntity::entity_type`]
//!
//! The defaults do nothing, so simple reference records only implement `from_create_params`,
//! `on_update` and `handle_action`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they can call other actors. The `Context` associated type is injected
/// into every hook when the actor starts (`run(context)`), which lets an order actor hold the
/// stock and counter clients without those being known at construction time.
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// Identifier of a record. Generated by the actor from a `u32` sequence and ordered so
    /// listings come back in creation order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a record.
    type Create: Send + Sync + Debug;

    /// Payload accepted by `update`.
    type Update: Send + Sync + Debug;

    /// Record-specific operations beyond CRUD (e.g. appending a ledger movement).
    type Action: Send + Sync + Debug;

    /// Result of an [`ActorEntity::Action`].
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor at `run()`. Use `()` when there are none.
    type Context: Send + Sync;

    /// Error type raised by hooks and actions.
    ///
    /// One error enum per collection rather than one per action. The framework boxes it into
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError); clients recover the
    /// concrete value with [`FrameworkError::into_entity`](crate::FrameworkError::into_entity).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the record from its generated id and the create payload.
    /// Runs synchronously, before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Key that must be unique across the collection (a supplier code, a username).
    ///
    /// The actor checks it against every stored record before inserting or committing an
    /// update. Because the check runs inside the actor loop it cannot race another writer.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Short name used as the `entity_type` field in actor logs.
    ///
    /// Defaults to the type name without its module path or generic arguments.
    fn entity_type() -> &'static str {
        let full = std::any::type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base)
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after `from_create_params` and before the record is stored.
    /// Returning an error discards the record.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the record is removed. Returning an error keeps it.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
