//! # Mock Clients for Tests
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a
//! queue of expectations instead of by a running actor. Use it to test an actor whose hooks
//! call other collections (the order actor calling the stock and counter actors) without
//! starting those collections, and to inject failures that are awkward to reproduce with real
//! state (a closed actor halfway through a multi-step sequence).
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | State | Scripted replies | Real records |
//! | Failure injection | `return_err(..)` | Needs crafted state |
//! | Use | Isolating one actor's dependencies | Whole-system flows |
//!
//! Expectations are consumed strictly in order. A request of the wrong kind, or one addressing
//! a different id than the expectation names, panics the mock task, which surfaces in the test
//! as `ActorDropped`.
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Counter { id: u32, value: u64 }
//! #[derive(Debug)] struct CounterCreate;
//! #[derive(Debug)] struct CounterUpdate;
//! #[derive(Debug)] enum CounterAction { Next }
//! #[derive(Debug, thiserror::Error)] #[error("counter")] struct CounterError;
//!
//! #[async_trait]
//! impl ActorEntity for Counter {
//!     type Id = u32; type Create = CounterCreate; type Update = CounterUpdate;
//!     type Action = CounterAction; type ActionResult = u64; type Context = ();
//!     type Error = CounterError;
//!     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, value: 0 })
//!     }
//!     async fn on_update(&mut self, _: CounterUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u64, Self::Error> {
//!         self.value += 1;
//!         Ok(self.value)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Counter>::new();
//!     mock.expect_action(1).return_ok(41);
//!     mock.expect_action(1).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.perform_action(1, CounterAction::Next).await.unwrap(), 41);
//!     assert!(matches!(
//!         client.perform_action(1, CounterAction::Next).await,
//!         Err(FrameworkError::ActorClosed)
//!     ));
//!     mock.verify();
//! }
//! ```
//!
//! The lower-level [`create_mock_client`] returns the raw request receiver so a test can
//! assert on the exact payload before replying.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A scripted reply for one request, optionally pinned to the id it must address.
struct Expectation<T: ActorEntity> {
    id: Option<T::Id>,
    reply: Scripted<T>,
}

enum Scripted<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Delete(Result<(), FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

impl<T: ActorEntity> Scripted<T> {
    fn name(&self) -> &'static str {
        match self {
            Scripted::Get(_) => "get",
            Scripted::List(_) => "list",
            Scripted::Create(_) => "create",
            Scripted::Update(_) => "update",
            Scripted::Delete(_) => "delete",
            Scripted::Action(_) => "action",
        }
    }
}

fn request_id<T: ActorEntity>(request: &ResourceRequest<T>) -> Option<&T::Id> {
    match request {
        ResourceRequest::Get { id, .. }
        | ResourceRequest::Update { id, .. }
        | ResourceRequest::Delete { id, .. }
        | ResourceRequest::Action { id, .. } => Some(id),
        ResourceRequest::Create { .. } | ResourceRequest::List { .. } => None,
    }
}

/// A mock client answering requests from an expectation queue.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                if let (Some(expected), Some(actual)) = (
                    next.as_ref().and_then(|e| e.id.as_ref()),
                    request_id(&request),
                ) {
                    if expected != actual {
                        panic!("Expected a request for {expected}, got one for {actual}");
                    }
                }
                match (request, next.map(|e| e.reply)) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Scripted::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::List { respond_to }, Some(Scripted::List(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Scripted::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Update { respond_to, .. }, Some(Scripted::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Delete { respond_to, .. }, Some(Scripted::Delete(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Action { respond_to, .. }, Some(Scripted::Action(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (request, next) => {
                        panic!(
                            "Unexpected request {:?}, next expectation: {}",
                            request,
                            next.as_ref().map_or("none", Scripted::name)
                        );
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// The client to hand to the code under test.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// The request must address `id`.
    pub fn expect_get(&mut self, id: T::Id) -> Reply<'_, T, Option<T>> {
        Reply::new(self, Some(id), Scripted::Get)
    }

    pub fn expect_list(&mut self) -> Reply<'_, T, Vec<T>> {
        Reply::new(self, None, Scripted::List)
    }

    pub fn expect_create(&mut self) -> Reply<'_, T, T::Id> {
        Reply::new(self, None, Scripted::Create)
    }

    pub fn expect_update(&mut self, id: T::Id) -> Reply<'_, T, T> {
        Reply::new(self, Some(id), Scripted::Update)
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Reply<'_, T, ()> {
        Reply::new(self, Some(id), Scripted::Delete)
    }

    pub fn expect_action(&mut self, id: T::Id) -> Reply<'_, T, T::ActionResult> {
        Reply::new(self, Some(id), Scripted::Action)
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder finishing one expectation with its reply.
pub struct Reply<'a, T: ActorEntity, R> {
    mock: &'a MockClient<T>,
    id: Option<T::Id>,
    wrap: fn(Result<R, FrameworkError>) -> Scripted<T>,
}

impl<'a, T: ActorEntity, R> Reply<'a, T, R> {
    fn new(
        mock: &'a MockClient<T>,
        id: Option<T::Id>,
        wrap: fn(Result<R, FrameworkError>) -> Scripted<T>,
    ) -> Self {
        Self { mock, id, wrap }
    }

    pub fn return_ok(self, value: R) {
        self.finish(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.finish(Err(error));
    }

    fn finish(self, result: Result<R, FrameworkError>) {
        self.mock.push(Expectation {
            id: self.id,
            reply: (self.wrap)(result),
        });
    }
}

/// Creates a client plus the raw request receiver, for tests that inspect payloads.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next request, if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Brand {
        id: u32,
        name: String,
    }

    #[derive(Debug)]
    struct BrandCreate {
        name: String,
    }

    #[derive(Debug)]
    struct BrandUpdate;

    #[derive(Debug)]
    enum BrandAction {}

    #[derive(Debug, thiserror::Error)]
    #[error("Brand error")]
    struct BrandError;

    #[async_trait]
    impl ActorEntity for Brand {
        type Id = u32;
        type Create = BrandCreate;
        type Update = BrandUpdate;
        type Action = BrandAction;
        type ActionResult = ();
        type Context = ();
        type Error = BrandError;

        fn from_create_params(id: u32, params: BrandCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
            })
        }

        async fn on_update(&mut self, _: BrandUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, action: BrandAction, _: &()) -> Result<(), Self::Error> {
            match action {}
        }
    }

    fn brand(id: u32, name: &str) -> Brand {
        Brand {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_raw_receiver_sees_create_payload() {
        let (client, mut receiver) = create_mock_client::<Brand>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(BrandCreate {
                    name: "Acme".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Acme");
        responder.send(Ok(7)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_expectations_are_consumed_in_order() {
        let mut mock = MockClient::<Brand>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(brand(1, "Acme")));
        mock.expect_list()
            .return_ok(vec![brand(1, "Acme"), brand(2, "Globex")]);

        let client = mock.client();
        let id = client
            .create(BrandCreate {
                name: "Acme".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.get(1).await.unwrap(), Some(brand(1, "Acme")));
        assert_eq!(client.list().await.unwrap().len(), 2);

        mock.verify();
    }

    #[tokio::test]
    async fn test_scripted_failure_reaches_caller() {
        let mut mock = MockClient::<Brand>::new();
        mock.expect_delete(3)
            .return_err(FrameworkError::NotFound("3".to_string()));

        let result = mock.client().delete(3).await;
        assert!(matches!(result, Err(FrameworkError::NotFound(id)) if id == "3"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_request_for_other_id_is_refused() {
        let mut mock = MockClient::<Brand>::new();
        mock.expect_get(1).return_ok(Some(brand(1, "Acme")));

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_flags_unused_expectation() {
        let mut mock = MockClient::<Brand>::new();
        mock.expect_get(1).return_ok(None);
        mock.verify();
    }
}
