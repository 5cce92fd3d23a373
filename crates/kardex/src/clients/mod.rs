//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient), one per
//! collection. Each maps [`FrameworkError`](resource_actor::FrameworkError) into its actor's
//! error type, recovering the concrete entity error where there is one.

pub mod catalog_client;
pub mod counter_client;
pub mod employee_client;
pub mod order_client;
pub mod stock_client;

pub use catalog_client::*;
pub use counter_client::*;
pub use employee_client::*;
pub use order_client::*;
pub use stock_client::*;
