//! Commands - Requests to change state in one bounded context
//!
//! Commands travel as JSON objects tagged with their `type` and camelCase
//! fields, matching the DTOs the administration client posts.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    CatalogBrandId, CatalogTypeId, LocationId, ProductId, RecordId,
};

/// Bounded contexts of the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    Catalog,
    Identity,
    Location,
    Ordering,
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Context::Catalog => write!(f, "catalog"),
            Context::Identity => write!(f, "identity"),
            Context::Location => write!(f, "location"),
            Context::Ordering => write!(f, "ordering"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Command {
    // ========================================================================
    // Catalog
    // ========================================================================
    DefineCatalogType {
        type_id: CatalogTypeId,
        name: String,
    },

    DefineCatalogBrand {
        brand_id: CatalogBrandId,
        name: String,
    },

    AddProduct {
        product_id: ProductId,
        name: String,
        price: f64,
        catalog_brand_id: CatalogBrandId,
        catalog_type_id: CatalogTypeId,
    },

    SetPictureProduct {
        product_id: ProductId,
        content: String,
        content_type: String,
    },

    UpdateDescriptionProduct {
        product_id: ProductId,
        description: String,
    },

    // ========================================================================
    // Identity
    // ========================================================================
    RegisterUser {
        user_name: String,
        given_name: String,
    },

    EnableUser {
        user_name: String,
    },

    DisableUser {
        user_name: String,
    },

    // ========================================================================
    // Location
    // ========================================================================
    AddLocation {
        location_id: LocationId,
        code: String,
        #[serde(default)]
        description: Option<String>,
    },

    RecordUser {
        record_id: RecordId,
        location_id: LocationId,
        user_name: String,
    },
}

impl Command {
    /// Context whose handler owns this command
    pub fn context(&self) -> Context {
        match self {
            Command::DefineCatalogType { .. }
            | Command::DefineCatalogBrand { .. }
            | Command::AddProduct { .. }
            | Command::SetPictureProduct { .. }
            | Command::UpdateDescriptionProduct { .. } => Context::Catalog,
            Command::RegisterUser { .. }
            | Command::EnableUser { .. }
            | Command::DisableUser { .. } => Context::Identity,
            Command::AddLocation { .. } | Command::RecordUser { .. } => Context::Location,
        }
    }

    /// Get the command type name
    pub fn command_type(&self) -> &'static str {
        match self {
            Command::DefineCatalogType { .. } => "DefineCatalogType",
            Command::DefineCatalogBrand { .. } => "DefineCatalogBrand",
            Command::AddProduct { .. } => "AddProduct",
            Command::SetPictureProduct { .. } => "SetPictureProduct",
            Command::UpdateDescriptionProduct { .. } => "UpdateDescriptionProduct",
            Command::RegisterUser { .. } => "RegisterUser",
            Command::EnableUser { .. } => "EnableUser",
            Command::DisableUser { .. } => "DisableUser",
            Command::AddLocation { .. } => "AddLocation",
            Command::RecordUser { .. } => "RecordUser",
        }
    }
}
