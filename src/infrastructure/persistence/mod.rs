//! Document store adapters
//!
//! The SQLite store is used when a database URL is configured; otherwise the
//! engine keeps its documents in memory.

mod memory_store;
mod sqlite_store;

pub use memory_store::InMemoryDocumentStore;
pub use sqlite_store::SqliteDocumentStore;
