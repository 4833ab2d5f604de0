//! Application configuration

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,

    /// SQLite database URL; documents are kept in memory when unset
    pub database_url: Option<String>,

    /// How many times a transiently failing message is retried in place
    pub immediate_retries: u32,

    /// Base URL the administration client posts commands to
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_url: None,
            immediate_retries: 5,
            api_base_url: "http://localhost:3000".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| defaults.server_port.to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),

            immediate_retries: env::var("IMMEDIATE_RETRIES")
                .unwrap_or_else(|_| defaults.immediate_retries.to_string())
                .parse()
                .context("IMMEDIATE_RETRIES must be a non-negative integer")?,

            api_base_url: env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
        })
    }
}
