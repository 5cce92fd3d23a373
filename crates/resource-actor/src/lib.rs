//! # Resource Actor
//!
//! Building blocks for keeping collections of business records (stock items, orders,
//! counters, suppliers) in single-writer Tokio tasks.
//!
//! ## Why one actor per collection?
//!
//! A collection actor owns its records and handles one request at a time. Every
//! read-modify-write against a record, such as appending a movement to a stock ledger or
//! bumping a sequence counter, completes before the next request is looked at. That gives the
//! same guarantee a database transaction gives a single document, without locks in the
//! calling code.
//!
//! When records in different collections have to change together (an order consuming stock),
//! the owning actor coordinates through **Action messages** sent to the other collection's
//! client, and undoes its completed steps when a later one fails.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the record type, its payloads, hooks and actions.
//! 2. **Runtime** ([`ResourceActor`]): the message loop and the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed async calls.
//!
//! ## Context Injection
//!
//! Dependencies are injected when the actor starts, not when it is constructed:
//!
//! ```rust,ignore
//! let (stock_actor, stock_client) = ResourceActor::<StockItem>::new(32);
//! let (order_actor, order_client) = ResourceActor::<Order>::new(32);
//!
//! tokio::spawn(stock_actor.run(()));
//! tokio::spawn(order_actor.run(OrderContext { stock: stock_client.clone(), .. }));
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task.
//! - Requests to one actor are processed sequentially.
//! - Different actors run in parallel.
//! - The actor stops once every client clone has been dropped.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from scripted expectations so an actor can be tested
//! with its dependencies replaced.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
