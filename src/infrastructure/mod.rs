//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: in-memory and SQLite document stores
//! - Bus: in-process message bus and its worker
//! - HTTP: REST API routes
//! - API client: reqwest client used by the administration tooling
//! - Config: Application configuration
//! - State: Shared application state

pub mod api_client;
pub mod bus;
pub mod config;
pub mod http;
pub mod persistence;
pub mod state;
