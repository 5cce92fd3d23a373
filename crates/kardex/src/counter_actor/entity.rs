use super::error::CounterError;
use super::{CounterAction, CounterActionResult};
use crate::model::{Counter, CounterCreate, CounterId, CounterUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

fn validate_name(name: &str) -> Result<(), CounterError> {
    if name.trim().is_empty() {
        return Err(CounterError::Validation("name must not be empty".into()));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Counter {
    type Id = CounterId;
    type Create = CounterCreate;
    type Update = CounterUpdate;
    type Action = CounterAction;
    type ActionResult = CounterActionResult;
    type Context = ();
    type Error = CounterError;

    fn from_create_params(id: CounterId, params: CounterCreate) -> Result<Self, CounterError> {
        validate_name(&params.name)?;
        Ok(Self {
            id,
            name: params.name,
            value: params.start,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.name.clone())
    }

    async fn on_update(&mut self, update: CounterUpdate, _ctx: &()) -> Result<(), CounterError> {
        if let Some(name) = update.name {
            validate_name(&name)?;
            self.name = name;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CounterAction,
        _ctx: &(),
    ) -> Result<CounterActionResult, CounterError> {
        match action {
            CounterAction::Next => {
                self.value = self
                    .value
                    .checked_add(1)
                    .ok_or_else(|| CounterError::Exhausted(self.name.clone()))?;
                Ok(CounterActionResult::Next(self.value))
            }
            CounterAction::Current => Ok(CounterActionResult::Current(self.value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn next_increments_from_start() {
        let mut counter = Counter::from_create_params(
            CounterId(1),
            CounterCreate {
                name: "orders".into(),
                start: 41,
            },
        )
        .unwrap();
        assert_eq!(
            counter.handle_action(CounterAction::Next, &()).await,
            Ok(CounterActionResult::Next(42))
        );
        assert_eq!(
            counter.handle_action(CounterAction::Current, &()).await,
            Ok(CounterActionResult::Current(42))
        );
    }

    #[tokio::test]
    async fn exhausted_counter_stays_put() {
        let mut counter = Counter::from_create_params(
            CounterId(1),
            CounterCreate {
                name: "orders".into(),
                start: u64::MAX,
            },
        )
        .unwrap();
        assert!(matches!(
            counter.handle_action(CounterAction::Next, &()).await,
            Err(CounterError::Exhausted(_))
        ));
        assert_eq!(counter.value, u64::MAX);
    }
}
