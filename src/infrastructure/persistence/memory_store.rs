//! In-memory document store, used when no database is configured and in tests

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{DocumentStorePort, DocumentWrite, StoreError};

#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<BTreeMap<(String, String), Value>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStorePort for InMemoryDocumentStore {
    async fn get(&self, bucket: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents.get(&(bucket.to_string(), id.to_string())).cloned())
    }

    async fn list(&self, bucket: &str) -> Result<Vec<Value>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|((b, _), _)| b == bucket)
            .map(|(_, body)| body.clone())
            .collect())
    }

    async fn commit(&self, writes: Vec<DocumentWrite>) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        for write in writes {
            documents.insert((write.bucket.to_string(), write.id), write.body);
        }
        Ok(())
    }
}
