//! # Order Actor
//!
//! Order intake and the order status lifecycle.
//!
//! ## Intake
//!
//! Creating an order runs as a saga inside [`Order::on_create`](resource_actor::ActorEntity::on_create):
//!
//! 1. every line is issued against the stock actor (an `Exit` referencing the order),
//! 2. if a line fails, the lines already issued are returned with `Entry` movements,
//! 3. the order number is minted only after all stock is secured,
//! 4. the order is stored with status `Pendente`.
//!
//! Minting the number last keeps the sequence gap-free: a rejected order never consumes one.
//!
//! ## Dependencies
//!
//! The actor is started with an [`OrderContext`] holding the stock client and the numbering
//! handle:
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new(32);
//! tokio::spawn(order_actor.run(OrderContext { stock, numbering }));
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{OrderNumbering, StockClient};
use crate::model::Order;
use resource_actor::{ResourceActor, ResourceClient};

/// Clients the order actor calls while handling requests.
#[derive(Clone)]
pub struct OrderContext {
    pub stock: StockClient,
    pub numbering: OrderNumbering,
}

/// Creates a new order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
