//! # Generic Actor Server
//!
//! `ResourceActor` owns one collection of records and processes its requests sequentially.
//! Every read-modify-write on a record (a ledger append, a counter increment, a uniqueness
//! check before insert) therefore happens without another writer interleaving.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of records.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new(buffer)` returns the actor and its client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on the Tokio runtime.
///
/// ```rust
/// use resource_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Bin { id: u32, label: String }
/// #[derive(Debug)] struct BinCreate { label: String }
/// #[derive(Debug)] struct BinUpdate;
/// #[derive(Debug)] enum BinAction {}
/// #[derive(Debug, thiserror::Error)] #[error("bin error")] struct BinError;
///
/// #[async_trait]
/// impl ActorEntity for Bin {
///     type Id = u32;
///     type Create = BinCreate;
///     type Update = BinUpdate;
///     type Action = BinAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = BinError;
///
///     fn from_create_params(id: u32, p: BinCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, label: p.label })
///     }
///     fn unique_key(&self) -> Option<String> { Some(self.label.clone()) }
///     async fn on_update(&mut self, _: BinUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, a: BinAction, _: &()) -> Result<(), Self::Error> { match a {} }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Bin>::new(10);
///     tokio::spawn(actor.run(()));
///
///     client.create(BinCreate { label: "A-01".into() }).await.unwrap();
///     // Same label again: rejected inside the actor loop.
///     assert!(client.create(BinCreate { label: "A-01".into() }).await.is_err());
/// }
/// ```
///
/// # Operations
///
/// * **Create**: next id from the `u32` sequence → `from_create_params` → uniqueness
///   check → `on_create` → insert.
/// * **Get** / **List**: clones out of the store; `List` is ordered by id.
/// * **Update**: applied to a copy, checked for uniqueness, then committed. A failing
///   `on_update` leaves the stored record untouched.
/// * **Delete**: `on_delete` may veto the removal.
/// * **Action**: runs `handle_action` on the stored record in place.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` is the mpsc capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    fn key_taken(&self, key: &str, except: Option<&T::Id>) -> bool {
        self.store.iter().any(|(id, item)| {
            Some(id) != except && item.unique_key().as_deref() == Some(key)
        })
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is handed to every hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = T::entity_type();
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Some(key) = item.unique_key() {
                        if self.key_taken(&key, None) {
                            warn!(entity_type, %key, "Duplicate key");
                            let _ = respond_to.send(Err(FrameworkError::Conflict(key)));
                            continue;
                        }
                    }
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, %id, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut draft = current.clone();
                    if let Err(e) = draft.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Some(key) = draft.unique_key() {
                        if self.key_taken(&key, Some(&id)) {
                            warn!(entity_type, %id, %key, "Duplicate key");
                            let _ = respond_to.send(Err(FrameworkError::Conflict(key)));
                            continue;
                        }
                    }
                    self.store.insert(id.clone(), draft.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(draft));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
