//! # Stock Client
//!
//! High-level API for the stock actor: item registration and the Kardex.
use crate::model::{
    AdjustmentDirection, Movement, MovementDraft, MovementFilter, MovementKind, StockItem,
    StockItemCreate, StockItemId, StockItemUpdate,
};
use crate::stock_actor::{StockAction, StockActionResult, StockError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the stock actor.
#[derive(Clone)]
pub struct StockClient {
    inner: ResourceClient<StockItem>,
}

impl StockClient {
    pub fn new(inner: ResourceClient<StockItem>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<StockItem> for StockClient {
    type Error = StockError;

    fn inner(&self) -> &ResourceClient<StockItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<StockError>() {
            Ok(e) => e,
            Err(FrameworkError::NotFound(id)) => StockError::NotFound(id),
            Err(FrameworkError::Conflict(code)) => StockError::DuplicateCode(code),
            Err(other) => StockError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn unexpected(result: StockActionResult) -> StockError {
    StockError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

impl StockClient {
    #[instrument(skip(self))]
    pub async fn create_item(&self, params: StockItemCreate) -> Result<StockItemId, StockError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        id: StockItemId,
        update: StockItemUpdate,
    ) -> Result<StockItem, StockError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Current on-hand quantity.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: StockItemId) -> Result<u32, StockError> {
        match self
            .inner
            .perform_action(id, StockAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            StockActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Append a movement to the item's Kardex and return the stored row.
    #[instrument(skip(self))]
    pub async fn record(&self, id: StockItemId, draft: MovementDraft) -> Result<Movement, StockError> {
        match self
            .inner
            .perform_action(id, StockAction::Record(draft))
            .await
            .map_err(Self::map_error)?
        {
            StockActionResult::Record(movement) => Ok(movement),
            other => Err(unexpected(other)),
        }
    }

    /// Goods in.
    pub async fn receive(
        &self,
        id: StockItemId,
        quantity: u32,
        reference: &str,
    ) -> Result<Movement, StockError> {
        self.record(id, MovementDraft::entry(quantity).with_reference(reference))
            .await
    }

    pub async fn receive_with_note(
        &self,
        id: StockItemId,
        quantity: u32,
        reference: &str,
        note: &str,
    ) -> Result<Movement, StockError> {
        let draft = MovementDraft::entry(quantity)
            .with_reference(reference)
            .with_note(note);
        self.record(id, draft).await
    }

    /// Goods out. Rejected with [`StockError::InsufficientStock`] when it exceeds the balance.
    pub async fn issue(
        &self,
        id: StockItemId,
        quantity: u32,
        reference: &str,
    ) -> Result<Movement, StockError> {
        self.record(id, MovementDraft::exit(quantity).with_reference(reference))
            .await
    }

    /// Inventory-count correction.
    pub async fn adjust(
        &self,
        id: StockItemId,
        direction: AdjustmentDirection,
        quantity: u32,
        note: &str,
    ) -> Result<Movement, StockError> {
        let draft = MovementDraft::new(MovementKind::Adjustment(direction), quantity).with_note(note);
        self.record(id, draft).await
    }

    /// Planned movement; the balance is carried over unchanged.
    pub async fn forecast(
        &self,
        id: StockItemId,
        quantity: u32,
        note: &str,
    ) -> Result<Movement, StockError> {
        let draft = MovementDraft::new(MovementKind::Forecast, quantity).with_note(note);
        self.record(id, draft).await
    }

    /// The item's Kardex in append order, narrowed by `filter`.
    #[instrument(skip(self))]
    pub async fn movements(
        &self,
        id: StockItemId,
        filter: MovementFilter,
    ) -> Result<Vec<Movement>, StockError> {
        match self
            .inner
            .perform_action(id, StockAction::Movements(filter))
            .await
            .map_err(Self::map_error)?
        {
            StockActionResult::Movements(rows) => Ok(rows),
            other => Err(unexpected(other)),
        }
    }

    /// Looks an item up by its code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<StockItem>, StockError> {
        Ok(self.list().await?.into_iter().find(|item| item.code == code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_check_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<StockItem>(10);
        let stock = StockClient::new(client);

        let task = tokio::spawn(async move { stock.check_stock(StockItemId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, StockItemId(1));
        assert!(matches!(action, StockAction::CheckStock));
        responder.send(Ok(StockActionResult::CheckStock(42))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_issue_sends_exit_with_reference() {
        let (client, mut receiver) = create_mock_client::<StockItem>(10);
        let stock = StockClient::new(client);

        let task = tokio::spawn(async move { stock.issue(StockItemId(3), 5, "order_9").await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        match action {
            StockAction::Record(draft) => {
                assert_eq!(draft.kind, MovementKind::Exit);
                assert_eq!(draft.quantity, 5);
                assert_eq!(draft.reference.as_deref(), Some("order_9"));
            }
            other => panic!("Expected Record action, got {other:?}"),
        }
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                StockError::InsufficientStock {
                    requested: 5,
                    available: 2,
                },
            ))))
            .unwrap();

        assert_eq!(
            task.await.unwrap().unwrap_err(),
            StockError::InsufficientStock {
                requested: 5,
                available: 2
            }
        );
    }

    #[test]
    fn test_framework_errors_map_to_stock_errors() {
        assert_eq!(
            StockClient::map_error(FrameworkError::NotFound("item_4".into())),
            StockError::NotFound("item_4".into())
        );
        assert_eq!(
            StockClient::map_error(FrameworkError::Conflict("PAR-001".into())),
            StockError::DuplicateCode("PAR-001".into())
        );
        assert!(matches!(
            StockClient::map_error(FrameworkError::ActorClosed),
            StockError::ActorCommunicationError(_)
        ));
    }
}
