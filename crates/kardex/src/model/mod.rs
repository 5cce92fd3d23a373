//! Plain data types for every collection. Actor behaviour lives in the `*_actor` modules.

pub mod catalog;
pub mod counter;
pub mod employee;
pub mod kardex;
pub mod order;
pub mod stock;

pub use catalog::*;
pub use counter::*;
pub use employee::*;
pub use kardex::*;
pub use order::*;
pub use stock::*;
