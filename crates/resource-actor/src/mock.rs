//! # Mocking
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered from
//! a queue of scripted expectations instead of a running actor. Use it to test an actor
//! (or a client wrapper) in isolation from the actors it depends on.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | State | none, scripted replies | real store |
//! | Error injection | `return_err` | needs a specific state |
//! | Use for | dependencies of the unit under test | the unit under test |
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Dish { id: u32, name: String }
//! #[derive(Debug)] struct DishCreate;
//! #[derive(Debug, thiserror::Error)] #[error("dish error")] struct DishError;
//!
//! #[async_trait]
//! impl ActorEntity for Dish {
//!     type Id = u32; type Create = DishCreate; type Update = (); type Action = ();
//!     type ActionResult = (); type Context = (); type Error = DishError;
//!     async fn from_create_params(id: u32, _: DishCreate, _: &()) -> Result<Self, DishError> {
//!         Ok(Self { id, name: String::new() })
//!     }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), DishError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), DishError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Dish>::new();
//!     mock.expect_get(7).return_ok(Some(Dish { id: 7, name: "Dal".into() }));
//!     mock.expect_get(8).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(7).await.unwrap().unwrap().name, "Dal");
//!     assert!(matches!(client.get(8).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation (different kind or different id) is answered with
//! `FrameworkError::NotFound` describing the mismatch, and `verify` reports it.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

type Reply<R, E> = Result<R, FrameworkError<E>>;

enum Expectation<T: ActorEntity> {
    Create {
        response: Reply<T::Id, T::Error>,
    },
    Ensure {
        id: T::Id,
        response: Reply<T, T::Error>,
    },
    Get {
        id: T::Id,
        response: Reply<Option<T>, T::Error>,
    },
    List {
        response: Reply<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        response: Reply<T, T::Error>,
    },
    Delete {
        id: T::Id,
        response: Reply<(), T::Error>,
    },
    Action {
        id: T::Id,
        response: Reply<T::ActionResult, T::Error>,
    },
}

struct Script<T: ActorEntity> {
    pending: VecDeque<Expectation<T>>,
    mismatches: Vec<String>,
}

type Shared<T> = Arc<Mutex<Script<T>>>;

fn lock<T: ActorEntity>(script: &Shared<T>) -> MutexGuard<'_, Script<T>> {
    script.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock resource store driven by expectations.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    script: Shared<T>,
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
        let script: Shared<T> = Arc::new(Mutex::new(Script {
            pending: VecDeque::new(),
            mismatches: Vec::new(),
        }));
        let worker_script = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = lock(&worker_script).pending.pop_front();
                if let Some(mismatch) = answer(request, next) {
                    lock(&worker_script).mismatches.push(mismatch);
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            script,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response, _| Expectation::Create { response }, None)
    }

    pub fn expect_ensure(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(
            |response, id| Expectation::Ensure {
                id: id.unwrap_or_else(|| T::Id::from(0)),
                response,
            },
            Some(id),
        )
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(
            |response, id| Expectation::Get {
                id: id.unwrap_or_else(|| T::Id::from(0)),
                response,
            },
            Some(id),
        )
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response, _| Expectation::List { response }, None)
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(
            |response, id| Expectation::Update {
                id: id.unwrap_or_else(|| T::Id::from(0)),
                response,
            },
            Some(id),
        )
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(
            |response, id| Expectation::Delete {
                id: id.unwrap_or_else(|| T::Id::from(0)),
                response,
            },
            Some(id),
        )
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(
            |response, id| Expectation::Action {
                id: id.unwrap_or_else(|| T::Id::from(0)),
                response,
            },
            Some(id),
        )
    }

    fn builder<R>(
        &mut self,
        make: fn(Reply<R, T::Error>, Option<T::Id>) -> Expectation<T>,
        id: Option<T::Id>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            id,
            make,
            script: self.script.clone(),
        }
    }

    /// Panics if an expectation is still pending or a request did not match.
    pub fn verify(&self) {
        let script = lock(&self.script);
        assert!(
            script.mismatches.is_empty(),
            "Unexpected requests: {:?}",
            script.mismatches
        );
        assert!(
            script.pending.is_empty(),
            "Not all expectations were met. {} remaining",
            script.pending.len()
        );
    }
}

/// Records the reply for one expected request.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    id: Option<T::Id>,
    make: fn(Reply<R, T::Error>, Option<T::Id>) -> Expectation<T>,
    script: Shared<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError<T::Error>) {
        self.push(Err(error));
    }

    fn push(self, response: Reply<R, T::Error>) {
        let expectation = (self.make)(response, self.id);
        lock(&self.script).pending.push_back(expectation);
    }
}

fn reply<R, E>(respond_to: oneshot::Sender<Reply<R, E>>, response: Reply<R, E>) {
    let _ = respond_to.send(response);
}

fn reject<R, E>(respond_to: oneshot::Sender<Reply<R, E>>, reason: String) -> Option<String> {
    let _ = respond_to.send(Err(FrameworkError::NotFound(reason.clone())));
    Some(reason)
}

/// Answers one request; returns a description when it did not match the expectation.
fn answer<T: ActorEntity>(
    request: ResourceRequest<T>,
    next: Option<Expectation<T>>,
) -> Option<String> {
    match (request, next) {
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            reply(respond_to, response);
            None
        }
        (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
            reply(respond_to, response);
            None
        }
        (
            ResourceRequest::Ensure { id, respond_to, .. },
            Some(Expectation::Ensure { id: want, response }),
        )
        | (
            ResourceRequest::Update { id, respond_to, .. },
            Some(Expectation::Update { id: want, response }),
        ) => matched::<_, T>(id, want, respond_to, response),
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
            matched::<_, T>(id, want, respond_to, response)
        }
        (
            ResourceRequest::Delete { id, respond_to },
            Some(Expectation::Delete { id: want, response }),
        ) => matched::<_, T>(id, want, respond_to, response),
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: want, response }),
        ) => matched::<_, T>(id, want, respond_to, response),
        (request, _) => {
            let reason = format!("unexpected {} request", kind(&request));
            match request {
                ResourceRequest::Create { respond_to, .. } => reject(respond_to, reason),
                ResourceRequest::Ensure { respond_to, .. } => reject(respond_to, reason),
                ResourceRequest::Get { respond_to, .. } => reject(respond_to, reason),
                ResourceRequest::List { respond_to, .. } => reject(respond_to, reason),
                ResourceRequest::Update { respond_to, .. } => reject(respond_to, reason),
                ResourceRequest::Delete { respond_to, .. } => reject(respond_to, reason),
                ResourceRequest::Action { respond_to, .. } => reject(respond_to, reason),
            }
        }
    }
}

fn kind<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { .. } => "create".to_string(),
        ResourceRequest::Ensure { id, .. } => format!("ensure {id}"),
        ResourceRequest::Get { id, .. } => format!("get {id}"),
        ResourceRequest::List { .. } => "list".to_string(),
        ResourceRequest::Update { id, .. } => format!("update {id}"),
        ResourceRequest::Delete { id, .. } => format!("delete {id}"),
        ResourceRequest::Action { id, .. } => format!("action {id}"),
    }
}

fn matched<R, T: ActorEntity>(
    id: T::Id,
    want: T::Id,
    respond_to: oneshot::Sender<Reply<R, T::Error>>,
    response: Reply<R, T::Error>,
) -> Option<String> {
    if id == want {
        reply(respond_to, response);
        None
    } else {
        reject(respond_to, format!("expected id {want}, got {id}"))
    }
}

/// Creates a client and the raw receiver behind it, for asserting on requests directly.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Reply<T::ActionResult, T::Error>>,
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

/// Waits for the next request and returns it if it is a `Get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Reply<Option<T>, T::Error>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Chef {
        id: u32,
        name: String,
    }

    #[derive(Debug)]
    struct ChefCreate {
        name: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("chef error")]
    struct ChefError;

    #[async_trait]
    impl ActorEntity for Chef {
        type Id = u32;
        type Create = ChefCreate;
        type Update = ();
        type Action = ();
        type ActionResult = ();
        type Context = ();
        type Error = ChefError;

        async fn from_create_params(id: u32, params: ChefCreate, _: &()) -> Result<Self, ChefError> {
            Ok(Self {
                id,
                name: params.name,
            })
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), ChefError> {
            Ok(())
        }

        async fn handle_action(&mut self, _: (), _: &()) -> Result<(), ChefError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn raw_receiver_sees_requests() {
        let (client, mut receiver) = create_mock_client::<Chef>(10);

        let lookup = tokio::spawn(async move { client.get(3).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, 3);
        responder
            .send(Ok(Some(Chef {
                id: 3,
                name: "Asha".into(),
            })))
            .unwrap();

        let chef = lookup.await.unwrap().unwrap().unwrap();
        assert_eq!(chef.name, "Asha");
    }

    #[tokio::test]
    async fn expectations_are_replayed_in_order() {
        let mut mock = MockClient::<Chef>::new();
        mock.expect_create().return_ok(1);
        mock.expect_ensure(5).return_ok(Chef {
            id: 5,
            name: "Bo".into(),
        });
        mock.expect_list().return_ok(Vec::new());

        let client = mock.client();
        let id = client
            .create(ChefCreate {
                name: "Asha".into(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        let ensured = client.ensure(5, ChefCreate { name: "Bo".into() }).await.unwrap();
        assert_eq!(ensured.name, "Bo");
        assert!(client
            .list(crate::Filter::all())
            .await
            .unwrap()
            .is_empty());

        mock.verify();
    }

    #[tokio::test]
    async fn id_mismatch_is_reported() {
        let mut mock = MockClient::<Chef>::new();
        mock.expect_get(1).return_ok(None);

        let client = mock.client();
        let result = client.get(2).await;
        assert!(matches!(result, Err(FrameworkError::NotFound(_))));

        let verdict = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(verdict.is_err());
    }
}
