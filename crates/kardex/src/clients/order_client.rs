//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! Stock issue, compensation and numbering all happen inside the actor's `on_create` hook;
//! this client only sends requests and maps errors.
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Places an order. On success the stock has been issued and the order carries its number.
    #[instrument(skip(self, params), fields(buyer = %params.buyer, lines = params.lines.len()))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "place_order called");
        info!("Sending place_order to actor");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_order(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Moves the order to `status` and returns the status it had before.
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<OrderStatus, OrderError> {
        match self
            .inner
            .perform_action(id, OrderAction::SetStatus(status))
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::SetStatus(previous) => Ok(previous),
        }
    }

    /// Cancels the order and returns its stock.
    pub async fn cancel(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.set_status(id, OrderStatus::Cancelled).await
    }

    pub async fn find_by_number(&self, number: &str) -> Result<Option<Order>, OrderError> {
        Ok(self.list().await?.into_iter().find(|o| o.number == number))
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<OrderError>() {
            Ok(e) => e,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
