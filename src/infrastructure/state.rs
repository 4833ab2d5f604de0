//! Shared application state

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::application::ports::outbound::{DocumentStorePort, MessageBusPort};
use crate::application::services::{MessageDispatcher, QueryService};
use crate::infrastructure::bus::{BusWorker, InProcessBus};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::{InMemoryDocumentStore, SqliteDocumentStore};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub bus: Arc<dyn MessageBusPort>,
    pub query_service: QueryService,
}

impl AppState {
    /// Build state from configuration, returning the bus worker to spawn
    pub async fn new(config: AppConfig) -> Result<(Self, BusWorker)> {
        let store: Arc<dyn DocumentStorePort> = match &config.database_url {
            Some(url) => {
                let options = SqliteConnectOptions::from_str(url)
                    .with_context(|| format!("Invalid DATABASE_URL: {}", url))?
                    .create_if_missing(true);
                let pool = SqlitePoolOptions::new()
                    .connect_with(options)
                    .await
                    .context("Failed to connect to SQLite")?;
                Arc::new(
                    SqliteDocumentStore::new(pool)
                        .await
                        .context("Failed to initialize document schema")?,
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, documents are kept in memory");
                Arc::new(InMemoryDocumentStore::new())
            }
        };

        Ok(Self::with_store(config, store))
    }

    /// Build state over an existing document store
    pub fn with_store(config: AppConfig, store: Arc<dyn DocumentStorePort>) -> (Self, BusWorker) {
        let dispatcher = Arc::new(MessageDispatcher::with_platform_handlers(
            store.clone(),
            config.immediate_retries,
        ));
        let (bus, worker) = InProcessBus::new(dispatcher);

        let state = Self {
            config,
            bus: Arc::new(bus),
            query_service: QueryService::new(store),
        };
        (state, worker)
    }
}
