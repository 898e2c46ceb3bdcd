//! # Resource Actor
//!
//! Building blocks for keeping stateful records behind Tokio actors. Every record type
//! gets its own [`ResourceActor`] task that owns an in-memory store and processes
//! requests one at a time, so a single record's read-modify-write never interleaves
//! with another request for the same store.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) - the record type and its business rules
//! 2. **Runtime** ([`ResourceActor`]) - message loop, id allocation, atomic commit, retention
//! 3. **Interface** ([`ResourceClient`]) - cloneable, typed async handle
//!
//! ## Requests
//!
//! | Request | Meaning |
//! |---------|---------|
//! | `Create` | allocate an id, build the record, store it |
//! | `Ensure` | return the record under a caller-chosen id, building it first if absent |
//! | `Get` | read one record |
//! | `List` | read every record matching a predicate |
//! | `Update` | apply an update DTO |
//! | `Delete` | remove a record |
//! | `Action` | run a record-specific operation |
//!
//! `Update` and `Action` run against a working copy of the record. The copy replaces
//! the stored record only when the hook succeeds, so a failed mutation leaves the
//! record exactly as it was.
//!
//! ## Example
//!
//! ```rust
//! use resource_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Counter { id: u32, value: u32 }
//! #[derive(Debug)] struct CounterCreate;
//! #[derive(Debug)] enum CounterAction { Bump }
//! #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
//!
//! #[async_trait]
//! impl ActorEntity for Counter {
//!     type Id = u32;
//!     type Create = CounterCreate;
//!     type Update = ();
//!     type Action = CounterAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = CounterError;
//!
//!     async fn from_create_params(id: u32, _: CounterCreate, _: &()) -> Result<Self, CounterError> {
//!         Ok(Self { id, value: 0 })
//!     }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), CounterError> { Ok(()) }
//!     async fn handle_action(&mut self, action: CounterAction, _: &()) -> Result<u32, CounterError> {
//!         match action {
//!             CounterAction::Bump => { self.value += 1; Ok(self.value) }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Counter>::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(CounterCreate).await.unwrap();
//!     assert_eq!(client.perform_action(id, CounterAction::Bump).await.unwrap(), 1);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies (usually other clients) are handed to [`ResourceActor::run`] rather than
//! to the constructor. Every actor can be created first and wired afterwards, which keeps
//! construction free of ordering constraints.
//!
//! ## Testing
//!
//! The [`mock`] module provides `MockClient`, a `ResourceClient` backed by scripted
//! expectations instead of a running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::{ResourceActor, Retention};
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
