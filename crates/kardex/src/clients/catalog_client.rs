//! # Catalog Client
//!
//! One generic client for suppliers, categories, brands and units.
use crate::catalog_actor::{CatalogAction, CatalogActionResult, CatalogError};
use crate::model::{
    BrandKind, CatalogCreate, CatalogId, CatalogKind, CatalogRecord, CatalogUpdate, CategoryKind,
    SupplierKind, UnitKind,
};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

pub struct CatalogClient<K: CatalogKind> {
    inner: ResourceClient<CatalogRecord<K>>,
}

// Derived Clone would require `K: Clone` on the client itself.
impl<K: CatalogKind> Clone for CatalogClient<K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub type SupplierClient = CatalogClient<SupplierKind>;
pub type CategoryClient = CatalogClient<CategoryKind>;
pub type BrandClient = CatalogClient<BrandKind>;
pub type UnitClient = CatalogClient<UnitKind>;

impl<K: CatalogKind> CatalogClient<K> {
    pub fn new(inner: ResourceClient<CatalogRecord<K>>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<K: CatalogKind> ActorClient<CatalogRecord<K>> for CatalogClient<K> {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<CatalogRecord<K>> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<CatalogError>() {
            Ok(e) => e,
            Err(FrameworkError::NotFound(id)) => CatalogError::NotFound(id),
            Err(FrameworkError::Conflict(code)) => CatalogError::DuplicateCode(code),
            Err(other) => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl<K: CatalogKind> CatalogClient<K> {
    /// Registers a record. A code already present in this collection is a
    /// [`CatalogError::DuplicateCode`].
    #[instrument(skip(self), fields(collection = K::NAME))]
    pub async fn create(&self, params: CatalogCreate) -> Result<CatalogId, CatalogError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self), fields(collection = K::NAME))]
    pub async fn update(
        &self,
        id: CatalogId,
        update: CatalogUpdate,
    ) -> Result<CatalogRecord<K>, CatalogError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Returns the previous flag.
    #[instrument(skip(self), fields(collection = K::NAME))]
    pub async fn set_active(&self, id: CatalogId, active: bool) -> Result<bool, CatalogError> {
        match self
            .inner
            .perform_action(id, CatalogAction::SetActive(active))
            .await
            .map_err(Self::map_error)?
        {
            CatalogActionResult::SetActive(previous) => Ok(previous),
        }
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<CatalogRecord<K>>, CatalogError> {
        Ok(self.list().await?.into_iter().find(|r| r.code == code))
    }

    /// Records currently offered for selection.
    pub async fn list_active(&self) -> Result<Vec<CatalogRecord<K>>, CatalogError> {
        Ok(self.list().await?.into_iter().filter(|r| r.active).collect())
    }
}
