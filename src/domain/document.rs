//! Storable records
//!
//! Aggregates and read models are persisted as JSON documents. Each record
//! type names the bucket it lives in; within a bucket documents are keyed by
//! the string form of their identifier.

use serde::{de::DeserializeOwned, Serialize};

pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Bucket (collection) name for this record type
    const BUCKET: &'static str;
}
