//! Catalog aggregates - Product types, brands and products

use serde::{Deserialize, Serialize};

use crate::domain::document::Document;
use crate::domain::value_objects::{CatalogBrandId, CatalogTypeId, ProductId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogType {
    pub id: CatalogTypeId,
    pub name: String,
}

impl Document for CatalogType {
    const BUCKET: &'static str = "catalog.type";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogBrand {
    pub id: CatalogBrandId,
    pub name: String,
}

impl Document for CatalogBrand {
    const BUCKET: &'static str = "catalog.brand";
}

/// Picture attached to a product, kept as the encoded payload the client sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub content: String,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub catalog_type_id: CatalogTypeId,
    pub catalog_brand_id: CatalogBrandId,
    pub description: Option<String>,
    pub picture: Option<Picture>,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        catalog_type_id: CatalogTypeId,
        catalog_brand_id: CatalogBrandId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            catalog_type_id,
            catalog_brand_id,
            description: None,
            picture: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_picture(mut self, picture: Picture) -> Self {
        self.picture = Some(picture);
        self
    }
}

impl Document for Product {
    const BUCKET: &'static str = "catalog.product";
}
