//! SQLite document store

use async_trait::async_trait;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{DocumentStorePort, DocumentWrite, StoreError};

pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        // Create table if not exists
        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS documents (
                bucket TEXT NOT NULL,
                id TEXT NOT NULL,
                body TEXT NOT NULL,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (bucket, id)
            )
        "#).execute(&pool).await?;

        Ok(Self { pool })
    }
}

fn parse_body(body: &str) -> Result<Value, StoreError> {
    serde_json::from_str(body).map_err(StoreError::from)
}

#[async_trait]
impl DocumentStorePort for SqliteDocumentStore {
    async fn get(&self, bucket: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT body FROM documents WHERE bucket = ? AND id = ?")
                .bind(bucket)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(|(body,)| parse_body(&body)).transpose()
    }

    async fn list(&self, bucket: &str) -> Result<Vec<Value>, StoreError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT body FROM documents WHERE bucket = ? ORDER BY id")
                .bind(bucket)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.iter().map(|(body,)| parse_body(body)).collect()
    }

    async fn commit(&self, writes: Vec<DocumentWrite>) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        for write in writes {
            sqlx::query("INSERT OR REPLACE INTO documents (bucket, id, body, updated_at) VALUES (?, ?, ?, CURRENT_TIMESTAMP)")
                .bind(write.bucket)
                .bind(write.id)
                .bind(write.body.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}
