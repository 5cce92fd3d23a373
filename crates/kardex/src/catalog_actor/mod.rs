//! # Catalog Actors
//!
//! Suppliers, categories, brands and units. One generic [`ActorEntity`](resource_actor::ActorEntity)
//! implementation serves all four; each collection still runs in its own actor, so codes are
//! unique per collection.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::{CatalogKind, CatalogRecord};
use resource_actor::{ResourceActor, ResourceClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogAction {
    /// Switch the record on or off. Inactive records stay listed but are not offered for
    /// selection.
    SetActive(bool),
}

/// Results from CatalogActions - variants match 1:1 with CatalogAction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogActionResult {
    /// The previous flag.
    SetActive(bool),
}

/// Creates a catalog actor for one collection.
pub fn new<K: CatalogKind>(
    buffer_size: usize,
) -> (ResourceActor<CatalogRecord<K>>, ResourceClient<CatalogRecord<K>>) {
    ResourceActor::new(buffer_size)
}
