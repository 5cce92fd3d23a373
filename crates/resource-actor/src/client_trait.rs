//! # ActorClient Trait
//!
//! Shared read/delete surface for collection-specific clients built on a `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for collection-specific clients to inherit the standard reads.
///
/// Implementors supply the inner `ResourceClient` and how a `FrameworkError` becomes their own
/// error type; `get`, `list` and `delete` come for free.
///
/// ```rust
/// use resource_actor::{ActorClient, ActorEntity, FrameworkError, ResourceActor, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Unit { id: u32, symbol: String }
/// #[derive(Debug)] struct UnitCreate { symbol: String }
/// #[derive(Debug)] struct UnitUpdate;
/// #[derive(Debug)] enum UnitAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct UnitError(String);
///
/// #[async_trait]
/// impl ActorEntity for Unit {
///     type Id = u32;
///     type Create = UnitCreate;
///     type Update = UnitUpdate;
///     type Action = UnitAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = UnitError;
///
///     fn from_create_params(id: u32, p: UnitCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, symbol: p.symbol })
///     }
///     async fn on_update(&mut self, _: UnitUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, a: UnitAction, _: &()) -> Result<(), Self::Error> { match a {} }
/// }
///
/// struct UnitClient { inner: ResourceClient<Unit> }
///
/// #[async_trait]
/// impl ActorClient<Unit> for UnitClient {
///     type Error = UnitError;
///     fn inner(&self) -> &ResourceClient<Unit> { &self.inner }
///     fn map_error(e: FrameworkError) -> Self::Error { UnitError(e.to_string()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, inner) = ResourceActor::<Unit>::new(4);
///     tokio::spawn(actor.run(()));
///     let client = UnitClient { inner };
///
///     client.inner().create(UnitCreate { symbol: "kg".into() }).await.unwrap();
///     let units = client.list().await.unwrap();
///     assert_eq!(units[0].symbol, "kg");
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The collection-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the collection's error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Every record in the collection, ordered by id.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete a record by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
