//! Query Service - Read-only access to read models

use std::sync::Arc;

use tracing::instrument;

use crate::application::ports::outbound::{load, load_all, DocumentStorePort, StoreError};
use crate::domain::read_models::{
    CatalogBrandIndex, CatalogProductIndex, CatalogTypeIndex, LocationUserRecord, OrderingBuyer,
};
use crate::domain::value_objects::{ProductId, RecordId};

#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn DocumentStorePort>,
}

impl QueryService {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self { store }
    }

    /// Buyer for a user name
    #[instrument(skip(self))]
    pub async fn buyer(&self, user_name: &str) -> Result<Option<OrderingBuyer>, StoreError> {
        load(self.store.as_ref(), user_name).await
    }

    pub async fn location_user_record(
        &self,
        record_id: RecordId,
    ) -> Result<Option<LocationUserRecord>, StoreError> {
        load(self.store.as_ref(), &record_id.to_string()).await
    }

    pub async fn catalog_types(&self) -> Result<Vec<CatalogTypeIndex>, StoreError> {
        load_all(self.store.as_ref()).await
    }

    pub async fn catalog_brands(&self) -> Result<Vec<CatalogBrandIndex>, StoreError> {
        load_all(self.store.as_ref()).await
    }

    pub async fn catalog_product(
        &self,
        product_id: ProductId,
    ) -> Result<Option<CatalogProductIndex>, StoreError> {
        load(self.store.as_ref(), &product_id.to_string()).await
    }
}
