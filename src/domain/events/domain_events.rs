//! Domain events - Notifications of significant state changes
//!
//! Events are published by command handlers once the command's writes are
//! committed. Every registered event handler sees every event; handlers pick
//! the variants they project and ignore the rest.

use serde::{Deserialize, Serialize};

use crate::domain::commands::Context;
use crate::domain::value_objects::{
    CatalogBrandId, CatalogTypeId, LocationId, ProductId, RecordId,
};

/// All domain events in the system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Event {
    // ========================================================================
    // Catalog Events
    // ========================================================================

    /// A catalog type was defined
    CatalogTypeDefined {
        type_id: CatalogTypeId,
        name: String,
    },

    /// A catalog brand was defined
    CatalogBrandDefined {
        brand_id: CatalogBrandId,
        name: String,
    },

    /// A product was added to the catalog
    ProductAdded {
        product_id: ProductId,
        name: String,
        price: f64,
        catalog_type_id: CatalogTypeId,
        catalog_brand_id: CatalogBrandId,
    },

    /// A product picture was set
    ProductPictureSet {
        product_id: ProductId,
        content_type: String,
    },

    /// A product description was changed
    ProductDescriptionUpdated {
        product_id: ProductId,
        description: String,
    },

    // ========================================================================
    // Identity Events
    // ========================================================================

    /// A user registered
    UserRegistered {
        user_name: String,
        given_name: String,
    },

    /// A user was enabled
    UserEnabled {
        user_name: String,
    },

    /// A user was disabled
    UserDisabled {
        user_name: String,
    },

    // ========================================================================
    // Location Events
    // ========================================================================

    /// A location was added
    LocationAdded {
        location_id: LocationId,
        code: String,
    },

    /// A user was recorded at a location
    UserRecorded {
        record_id: RecordId,
        location_id: LocationId,
        user_id: String,
    },
}

impl Event {
    /// Context that published this event
    pub fn context(&self) -> Context {
        match self {
            Event::CatalogTypeDefined { .. }
            | Event::CatalogBrandDefined { .. }
            | Event::ProductAdded { .. }
            | Event::ProductPictureSet { .. }
            | Event::ProductDescriptionUpdated { .. } => Context::Catalog,
            Event::UserRegistered { .. } | Event::UserEnabled { .. } | Event::UserDisabled { .. } => {
                Context::Identity
            }
            Event::LocationAdded { .. } | Event::UserRecorded { .. } => Context::Location,
        }
    }

    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::CatalogTypeDefined { .. } => "CatalogTypeDefined",
            Event::CatalogBrandDefined { .. } => "CatalogBrandDefined",
            Event::ProductAdded { .. } => "ProductAdded",
            Event::ProductPictureSet { .. } => "ProductPictureSet",
            Event::ProductDescriptionUpdated { .. } => "ProductDescriptionUpdated",
            Event::UserRegistered { .. } => "UserRegistered",
            Event::UserEnabled { .. } => "UserEnabled",
            Event::UserDisabled { .. } => "UserDisabled",
            Event::LocationAdded { .. } => "LocationAdded",
            Event::UserRecorded { .. } => "UserRecorded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_format() {
        let event = Event::UserRecorded {
            record_id: RecordId::new(),
            location_id: LocationId::new(),
            user_id: "alice".to_string(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "UserRecorded");
        assert_eq!(json["userId"], "alice");
        assert!(json.get("recordId").is_some());
        assert!(json.get("locationId").is_some());
        assert!(json.get("record_id").is_none());

        let parsed: Event = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, event);
        assert_eq!(parsed.context(), Context::Location);
    }
}
