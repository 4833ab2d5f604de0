//! Document store port - Interface for aggregate and read model persistence
//!
//! Records are stored as JSON documents grouped in buckets. Writes are only
//! ever applied through `commit`, which must apply a whole batch or nothing.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::document::Document;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// A pending write of one document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentWrite {
    pub bucket: &'static str,
    pub id: String,
    pub body: Value,
}

#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    /// Get a document by bucket and id
    async fn get(&self, bucket: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// List all documents in a bucket, ordered by id
    async fn list(&self, bucket: &str) -> Result<Vec<Value>, StoreError>;

    /// Atomically insert or replace a batch of documents
    async fn commit(&self, writes: Vec<DocumentWrite>) -> Result<(), StoreError>;
}

/// Typed lookup of a single record
pub async fn load<T: Document>(
    store: &dyn DocumentStorePort,
    id: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(T::BUCKET, id).await? {
        Some(body) => Ok(Some(serde_json::from_value(body)?)),
        None => Ok(None),
    }
}

/// Typed listing of every record in `T`'s bucket
pub async fn load_all<T: Document>(store: &dyn DocumentStorePort) -> Result<Vec<T>, StoreError> {
    store
        .list(T::BUCKET)
        .await?
        .into_iter()
        .map(|body| serde_json::from_value(body).map_err(StoreError::from))
        .collect()
}
