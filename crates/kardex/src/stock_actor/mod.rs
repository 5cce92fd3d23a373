//! # Stock Actor
//!
//! Owns every stock item together with its Kardex. Each ledger append reads the latest balance
//! and writes the new row inside one message, so concurrent writers against the same item are
//! applied one after the other.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`StockItem`]
//! - [`error`] - [`StockError`]
//! - [`actions`] - [`StockAction`] and [`StockActionResult`]
//!
//! ## Usage
//!
//! ```rust
//! use kardex::clients::StockClient;
//! use kardex::model::StockItemCreate;
//! use kardex::stock_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = stock_actor::new(32);
//!     let client = StockClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create_item(StockItemCreate::new("PAR-001", "Parafuso", 10)).await?;
//!     let movement = client.issue(id.clone(), 4, "order_1").await?;
//!     assert_eq!(movement.balance, 6);
//!     assert_eq!(client.check_stock(id).await?, 6);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::StockItem;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new stock actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<StockItem>, ResourceClient<StockItem>) {
    ResourceActor::new(buffer_size)
}
