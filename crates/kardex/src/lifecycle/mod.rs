//! # System Lifecycle
//!
//! Starting, wiring and stopping the collection actors.
//!
//! ## Wiring
//!
//! Actors are created without their dependencies and receive them when they start
//! (`run(context)`). Only the order actor has any: it holds the stock client and the
//! [`OrderNumbering`](crate::clients::OrderNumbering) handle.
//!
//! ```rust,ignore
//! let (stock_actor, stock) = stock_actor::new(buffer);
//! let (order_actor, orders) = order_actor::new(buffer);
//!
//! tokio::spawn(stock_actor.run(()));
//! tokio::spawn(order_actor.run(OrderContext { stock: stock.clone(), numbering }));
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of each channel
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - wait for every actor task
//!
//! The order actor's context holds clones of the stock and counter clients. Those close when
//! the order actor stops, which it does once its own clients are gone, so the dependency
//! graph stays acyclic and shutdown needs no explicit message.

pub mod system;
pub mod tracing;

pub use self::tracing::*;
pub use system::*;
