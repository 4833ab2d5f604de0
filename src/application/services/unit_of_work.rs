//! Unit of Work - Buffered, typed access to aggregates and read models
//!
//! Handlers read through the unit of work and stage their writes on it. The
//! dispatcher commits the staged writes in one batch once every handler for
//! the message has succeeded; a failed attempt simply drops the unit of work.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use crate::application::ports::outbound::{DocumentStorePort, DocumentWrite, StoreError};
use crate::domain::document::Document;

#[derive(Debug, thiserror::Error)]
pub enum UnitOfWorkError {
    #[error("{bucket} '{id}' not found")]
    NotFound { bucket: &'static str, id: String },
    #[error("{bucket} '{id}' already exists")]
    AlreadyExists { bucket: &'static str, id: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UnitOfWorkError {
    /// Whether running the same message again could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, UnitOfWorkError::Store(StoreError::Database(_)))
    }
}

pub struct UnitOfWork {
    store: Arc<dyn DocumentStorePort>,
    staged: Vec<DocumentWrite>,
    positions: HashMap<(&'static str, String), usize>,
}

impl UnitOfWork {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self {
            store,
            staged: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Get a record, failing when it does not exist
    pub async fn get<T: Document>(&self, id: impl Display) -> Result<T, UnitOfWorkError> {
        let id = id.to_string();
        self.try_get::<T>(&id)
            .await?
            .ok_or(UnitOfWorkError::NotFound {
                bucket: T::BUCKET,
                id,
            })
    }

    /// Get a record if it exists, seeing this unit of work's own staged writes
    pub async fn try_get<T: Document>(&self, id: impl Display) -> Result<Option<T>, UnitOfWorkError> {
        let id = id.to_string();
        let body = match self.positions.get(&(T::BUCKET, id.clone())) {
            Some(&pos) => Some(self.staged[pos].body.clone()),
            None => self.store.get(T::BUCKET, &id).await?,
        };
        match body {
            Some(body) => Ok(Some(
                serde_json::from_value(body).map_err(StoreError::from)?,
            )),
            None => Ok(None),
        }
    }

    /// Stage a new record; fails if the id is already taken
    pub async fn add<T: Document>(&mut self, id: impl Display, model: &T) -> Result<(), UnitOfWorkError> {
        let id = id.to_string();
        if self.exists::<T>(&id).await? {
            return Err(UnitOfWorkError::AlreadyExists {
                bucket: T::BUCKET,
                id,
            });
        }
        self.stage(id, model)
    }

    /// Stage a replacement for an existing record
    pub async fn update<T: Document>(&mut self, id: impl Display, model: &T) -> Result<(), UnitOfWorkError> {
        let id = id.to_string();
        if !self.exists::<T>(&id).await? {
            return Err(UnitOfWorkError::NotFound {
                bucket: T::BUCKET,
                id,
            });
        }
        self.stage(id, model)
    }

    /// Number of staged writes
    pub fn pending(&self) -> usize {
        self.staged.len()
    }

    /// Write every staged record in one batch
    pub async fn commit(self) -> Result<usize, UnitOfWorkError> {
        let count = self.staged.len();
        if count > 0 {
            self.store.commit(self.staged).await?;
        }
        Ok(count)
    }

    async fn exists<T: Document>(&self, id: &str) -> Result<bool, UnitOfWorkError> {
        if self.positions.contains_key(&(T::BUCKET, id.to_string())) {
            return Ok(true);
        }
        Ok(self.store.get(T::BUCKET, id).await?.is_some())
    }

    fn stage<T: Document>(&mut self, id: String, model: &T) -> Result<(), UnitOfWorkError> {
        let body = serde_json::to_value(model).map_err(StoreError::from)?;
        match self.positions.get(&(T::BUCKET, id.clone())) {
            Some(&pos) => self.staged[pos].body = body,
            None => {
                self.positions.insert((T::BUCKET, id.clone()), self.staged.len());
                self.staged.push(DocumentWrite {
                    bucket: T::BUCKET,
                    id,
                    body,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Location, User};
    use crate::domain::value_objects::LocationId;
    use crate::infrastructure::persistence::InMemoryDocumentStore;

    fn store() -> Arc<InMemoryDocumentStore> {
        Arc::new(InMemoryDocumentStore::new())
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let uow = UnitOfWork::new(store());
        let err = uow.get::<User>("nobody").await.unwrap_err();
        assert!(matches!(err, UnitOfWorkError::NotFound { bucket: "identity.user", .. }));
    }

    #[tokio::test]
    async fn test_staged_writes_are_visible_before_commit() {
        let store = store();
        let mut uow = UnitOfWork::new(store.clone());
        let user = User::new("alice", "Alice");

        uow.add("alice", &user).await.unwrap();

        assert_eq!(uow.get::<User>("alice").await.unwrap(), user);
        assert!(store.get(User::BUCKET, "alice").await.unwrap().is_none());
        assert_eq!(uow.pending(), 1);
    }

    #[tokio::test]
    async fn test_commit_persists_staged_writes() {
        let store = store();
        let location_id = LocationId::new();
        let mut uow = UnitOfWork::new(store.clone());
        uow.add(location_id, &Location::new(location_id, "SEA-01"))
            .await
            .unwrap();
        assert_eq!(uow.commit().await.unwrap(), 1);

        let uow = UnitOfWork::new(store);
        let location: Location = uow.get(location_id).await.unwrap();
        assert_eq!(location.code, "SEA-01");
    }

    #[tokio::test]
    async fn test_add_rejects_existing_record() {
        let store = store();
        let mut uow = UnitOfWork::new(store.clone());
        uow.add("alice", &User::new("alice", "Alice")).await.unwrap();
        uow.commit().await.unwrap();

        let mut uow = UnitOfWork::new(store);
        let err = uow.add("alice", &User::new("alice", "Other")).await.unwrap_err();
        assert!(matches!(err, UnitOfWorkError::AlreadyExists { .. }));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_update_requires_existing_record_and_replaces_staged() {
        let mut uow = UnitOfWork::new(store());
        let mut user = User::new("bob", "Bob");
        assert!(uow.update("bob", &user).await.is_err());

        uow.add("bob", &user).await.unwrap();
        user.disabled = true;
        uow.update("bob", &user).await.unwrap();

        assert_eq!(uow.pending(), 1);
        assert!(uow.get::<User>("bob").await.unwrap().disabled);
    }

    #[tokio::test]
    async fn test_dropped_unit_of_work_writes_nothing() {
        let store = store();
        {
            let mut uow = UnitOfWork::new(store.clone());
            uow.add("carol", &User::new("carol", "Carol")).await.unwrap();
        }
        assert!(store.list(User::BUCKET).await.unwrap().is_empty());
    }
}
