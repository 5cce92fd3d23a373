//! # Counter Client
//!
//! Named sequences and the order-number formatter built on them.
use crate::counter_actor::{CounterAction, CounterActionResult, CounterError};
use crate::model::{Counter, CounterCreate, CounterId};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CounterClient {
    inner: ResourceClient<Counter>,
}

impl CounterClient {
    pub fn new(inner: ResourceClient<Counter>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Counter> for CounterClient {
    type Error = CounterError;

    fn inner(&self) -> &ResourceClient<Counter> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<CounterError>() {
            Ok(e) => e,
            Err(FrameworkError::NotFound(id)) => CounterError::NotFound(id),
            Err(FrameworkError::Conflict(name)) => CounterError::DuplicateName(name),
            Err(other) => CounterError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CounterClient {
    #[instrument(skip(self))]
    pub async fn create_counter(&self, params: CounterCreate) -> Result<CounterId, CounterError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Increment and return the new value.
    #[instrument(skip(self))]
    pub async fn next(&self, id: CounterId) -> Result<u64, CounterError> {
        match self
            .inner
            .perform_action(id, CounterAction::Next)
            .await
            .map_err(Self::map_error)?
        {
            CounterActionResult::Next(value) => Ok(value),
            other => Err(CounterError::ActorCommunicationError(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }

    #[instrument(skip(self))]
    pub async fn current(&self, id: CounterId) -> Result<u64, CounterError> {
        match self
            .inner
            .perform_action(id, CounterAction::Current)
            .await
            .map_err(Self::map_error)?
        {
            CounterActionResult::Current(value) => Ok(value),
            other => Err(CounterError::ActorCommunicationError(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Counter>, CounterError> {
        Ok(self.list().await?.into_iter().find(|c| c.name == name))
    }
}

/// Mints formatted order numbers (`PED-000001`) from one counter.
#[derive(Clone)]
pub struct OrderNumbering {
    counters: CounterClient,
    counter_id: CounterId,
    prefix: String,
    width: usize,
}

impl OrderNumbering {
    pub fn new(
        counters: CounterClient,
        counter_id: CounterId,
        prefix: impl Into<String>,
        width: usize,
    ) -> Self {
        Self {
            counters,
            counter_id,
            prefix: prefix.into(),
            width,
        }
    }

    /// Formats a raw counter value. Values wider than `width` are not truncated.
    pub fn format(&self, value: u64) -> String {
        format!("{}{:0width$}", self.prefix, value, width = self.width)
    }

    /// Takes the next value from the counter and formats it.
    #[instrument(skip(self), fields(counter = %self.counter_id))]
    pub async fn next(&self) -> Result<String, CounterError> {
        let value = self.counters.next(self.counter_id.clone()).await?;
        let number = self.format(value);
        debug!(%number, "Minted");
        Ok(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::MockClient;

    #[tokio::test]
    async fn test_numbering_formats_counter_value() {
        let mut mock = MockClient::<Counter>::new();
        mock.expect_action(CounterId(1))
            .return_ok(CounterActionResult::Next(7));
        mock.expect_action(CounterId(1))
            .return_ok(CounterActionResult::Next(1_234_567));

        let numbering = OrderNumbering::new(CounterClient::new(mock.client()), CounterId(1), "PED-", 6);
        assert_eq!(numbering.next().await.unwrap(), "PED-000007");
        assert_eq!(numbering.next().await.unwrap(), "PED-1234567");
        mock.verify();
    }

    #[tokio::test]
    async fn test_numbering_surfaces_counter_errors() {
        let mut mock = MockClient::<Counter>::new();
        mock.expect_action(CounterId(1))
            .return_err(FrameworkError::NotFound("counter_1".into()));

        let numbering = OrderNumbering::new(CounterClient::new(mock.client()), CounterId(1), "PED-", 6);
        assert_eq!(
            numbering.next().await.unwrap_err(),
            CounterError::NotFound("counter_1".into())
        );
    }
}
