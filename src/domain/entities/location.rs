//! Location aggregate - Physical places users can be recorded at

use serde::{Deserialize, Serialize};

use crate::domain::document::Document;
use crate::domain::value_objects::LocationId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    /// Short human-facing code, e.g. "SEA-01"
    pub code: String,
    pub description: Option<String>,
}

impl Location {
    pub fn new(id: LocationId, code: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Document for Location {
    const BUCKET: &'static str = "location.location";
}
