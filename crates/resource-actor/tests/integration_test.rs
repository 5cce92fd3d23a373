use resource_actor::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Location {
    id: u32,
    code: String,
    capacity: u32,
    used: u32,
}

#[derive(Debug)]
struct LocationCreate {
    code: String,
    capacity: u32,
}

#[derive(Debug)]
struct LocationUpdate {
    code: Option<String>,
    capacity: Option<u32>,
}

#[derive(Debug)]
enum LocationAction {
    Occupy(u32),
}

#[derive(Debug, PartialEq, thiserror::Error)]
enum LocationError {
    #[error("capacity must be positive")]
    ZeroCapacity,
    #[error("only {free} slots free")]
    Full { free: u32 },
    #[error("location is not empty")]
    NotEmpty,
}

#[async_trait]
impl ActorEntity for Location {
    type Id = u32;
    type Create = LocationCreate;
    type Update = LocationUpdate;
    type Action = LocationAction;
    type ActionResult = u32;
    type Context = ();
    type Error = LocationError;

    fn from_create_params(id: u32, params: LocationCreate) -> Result<Self, Self::Error> {
        if params.capacity == 0 {
            return Err(LocationError::ZeroCapacity);
        }
        Ok(Self {
            id,
            code: params.code,
            capacity: params.capacity,
            used: 0,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.code.clone())
    }

    async fn on_update(&mut self, update: LocationUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(code) = update.code {
            self.code = code;
        }
        if let Some(capacity) = update.capacity {
            if capacity == 0 {
                return Err(LocationError::ZeroCapacity);
            }
            self.capacity = capacity;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        if self.used > 0 {
            return Err(LocationError::NotEmpty);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: LocationAction, _ctx: &()) -> Result<u32, Self::Error> {
        match action {
            LocationAction::Occupy(n) => {
                let free = self.capacity - self.used;
                if n > free {
                    return Err(LocationError::Full { free });
                }
                self.used += n;
                Ok(self.capacity - self.used)
            }
        }
    }
}

fn create(code: &str, capacity: u32) -> LocationCreate {
    LocationCreate {
        code: code.to_string(),
        capacity,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Location>::new(10);
    tokio::spawn(actor.run(()));

    let id: u32 = client.create(create("A-01", 10)).await.unwrap();
    assert_eq!(id, 1);

    let free = client
        .perform_action(id, LocationAction::Occupy(4))
        .await
        .unwrap();
    assert_eq!(free, 6);

    let updated = client
        .update(
            id,
            LocationUpdate {
                code: Some("A-02".into()),
                capacity: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.code, "A-02");
    assert_eq!(updated.used, 4);

    // Occupied locations refuse deletion.
    let err = client.delete(id).await.unwrap_err();
    assert_eq!(err.into_entity::<LocationError>().unwrap(), LocationError::NotEmpty);
    assert!(client.get(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_action_errors_are_recoverable_as_entity_errors() {
    let (actor, client) = ResourceActor::<Location>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(create("B-01", 3)).await.unwrap();
    let err = client
        .perform_action(id, LocationAction::Occupy(5))
        .await
        .unwrap_err();
    assert_eq!(
        err.into_entity::<LocationError>().unwrap(),
        LocationError::Full { free: 3 }
    );
}

#[tokio::test]
async fn test_duplicate_keys_are_rejected_on_create_and_update() {
    let (actor, client) = ResourceActor::<Location>::new(10);
    tokio::spawn(actor.run(()));

    let first = client.create(create("C-01", 5)).await.unwrap();
    let second = client.create(create("C-02", 5)).await.unwrap();

    let dup = client.create(create("C-01", 1)).await.unwrap_err();
    assert!(matches!(dup, FrameworkError::Conflict(key) if key == "C-01"));

    let rename = client
        .update(
            second,
            LocationUpdate {
                code: Some("C-01".into()),
                capacity: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(rename, FrameworkError::Conflict(_)));

    // Re-saving a record under its own key is not a conflict.
    client
        .update(
            first,
            LocationUpdate {
                code: Some("C-01".into()),
                capacity: Some(8),
            },
        )
        .await
        .unwrap();

    let codes: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.code)
        .collect();
    assert_eq!(codes, vec!["C-01", "C-02"]);
}

#[tokio::test]
async fn test_failed_update_leaves_record_untouched() {
    let (actor, client) = ResourceActor::<Location>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(create("D-01", 5)).await.unwrap();
    let err = client
        .update(
            id,
            LocationUpdate {
                code: Some("D-99".into()),
                capacity: Some(0),
            },
        )
        .await
        .unwrap_err();
    assert!(err.entity_error::<LocationError>().is_some());

    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.code, "D-01");
    assert_eq!(stored.capacity, 5);
}

#[tokio::test]
async fn test_concurrent_actions_are_serialized() {
    let (actor, client) = ResourceActor::<Location>::new(64);
    tokio::spawn(actor.run(()));
    let id = client.create(create("E-01", 20)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..30 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.perform_action(id, LocationAction::Occupy(1)).await
        }));
    }

    let mut ok = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            ok += 1;
        }
    }
    assert_eq!(ok, 20);
    assert_eq!(client.get(id).await.unwrap().unwrap().used, 20);
}

#[tokio::test]
async fn test_missing_record_and_shutdown() {
    let (actor, client) = ResourceActor::<Location>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let err = client
        .perform_action(42, LocationAction::Occupy(1))
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(id) if id == "42"));

    let spare = client.clone();
    drop(client);
    drop(spare);
    handle.await.unwrap();
}
