//! # Kardex
//!
//! Stock ledger, order intake and order numbering for a small distribution business, each
//! collection kept by its own [`resource_actor`] task.
//!
//! - [`model`]: plain data types (stock items and their Kardex, orders, counters, reference
//!   records, employees)
//! - `*_actor`: the [`ActorEntity`](resource_actor::ActorEntity) implementations with their
//!   actions and errors
//! - [`clients`]: typed async clients
//! - [`lifecycle`]: [`KardexSystem`](lifecycle::KardexSystem) and tracing setup
//! - [`access`], [`reports`], [`status_log`], [`config`]

pub mod access;
pub mod catalog_actor;
pub mod clients;
pub mod config;
pub mod counter_actor;
pub mod employee_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod reports;
pub mod status_log;
pub mod stock_actor;
