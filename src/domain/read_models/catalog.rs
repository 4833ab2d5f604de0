//! Catalog read models - Lists behind the admin pickers and product lookups

use serde::{Deserialize, Serialize};

use crate::domain::document::Document;
use crate::domain::value_objects::{CatalogBrandId, CatalogTypeId, ProductId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogTypeIndex {
    pub id: CatalogTypeId,
    pub name: String,
}

impl Document for CatalogTypeIndex {
    const BUCKET: &'static str = "catalog.type_index";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogBrandIndex {
    pub id: CatalogBrandId,
    pub name: String,
}

impl Document for CatalogBrandIndex {
    const BUCKET: &'static str = "catalog.brand_index";
}

/// Denormalized product with type and brand names resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProductIndex {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub catalog_type_id: CatalogTypeId,
    pub catalog_type: String,
    pub catalog_brand_id: CatalogBrandId,
    pub catalog_brand: String,
    pub description: Option<String>,
    pub has_picture: bool,
}

impl Document for CatalogProductIndex {
    const BUCKET: &'static str = "catalog.product_index";
}
