//! Flat reference records: suppliers, categories, brands and units.
//!
//! The four collections share one shape and differ only in their marker type, so each gets
//! its own actor and its own `ActorEntity` type while sharing the code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::marker::PhantomData;

/// Marker for one reference collection.
pub trait CatalogKind: Clone + Debug + Send + Sync + 'static {
    /// Collection name used in logs and errors.
    const NAME: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplierKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitKind;

impl CatalogKind for SupplierKind {
    const NAME: &'static str = "Supplier";
}

impl CatalogKind for CategoryKind {
    const NAME: &'static str = "Category";
}

impl CatalogKind for BrandKind {
    const NAME: &'static str = "Brand";
}

impl CatalogKind for UnitKind {
    const NAME: &'static str = "Unit";
}

pub type Supplier = CatalogRecord<SupplierKind>;
pub type Category = CatalogRecord<CategoryKind>;
pub type Brand = CatalogRecord<BrandKind>;
pub type Unit = CatalogRecord<UnitKind>;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CatalogId(pub u32);

impl From<u32> for CatalogId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ref_{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord<K: CatalogKind> {
    pub id: CatalogId,
    /// Unique within the collection.
    pub code: String,
    pub name: String,
    /// Free-form fields (CNPJ, phone, abbreviation, ...).
    pub attributes: BTreeMap<String, String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub kind: PhantomData<K>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogCreate {
    pub code: String,
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

impl CatalogCreate {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Attributes given here are merged into the stored map; an empty value removes the key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogUpdate {
    pub code: Option<String>,
    pub name: Option<String>,
    pub attributes: BTreeMap<String, String>,
}
