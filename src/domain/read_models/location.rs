//! Location read models

use serde::{Deserialize, Serialize};

use crate::domain::document::Document;
use crate::domain::value_objects::{LocationId, RecordId};

/// A user seen at a location
///
/// Flattened copy of the location and user aggregates as they were when the
/// visit was recorded. Keyed by the record id carried on the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationUserRecord {
    pub id: RecordId,
    pub code: String,
    pub location_id: LocationId,
    pub name: String,
    pub user_name: String,
}

impl Document for LocationUserRecord {
    const BUCKET: &'static str = "location.user_record";
}
