//! Query API routes - Read models over REST

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::domain::read_models::{
    CatalogBrandIndex, CatalogProductIndex, CatalogTypeIndex, LocationUserRecord, OrderingBuyer,
};
use crate::domain::value_objects::{ProductId, RecordId};
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerQuery {
    #[serde(default, alias = "UserName", alias = "user_name")]
    pub user_name: Option<String>,
}

/// Get the ordering buyer for a user name
pub async fn get_buyer(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BuyerQuery>,
) -> Result<Json<OrderingBuyer>, (StatusCode, String)> {
    let user_name = query
        .user_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "userName is required".to_string()))?;

    state
        .query_service
        .buyer(&user_name)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Buyer not found: {}", user_name)))
}

/// List catalog types
pub async fn list_catalog_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CatalogTypeIndex>>, (StatusCode, String)> {
    state
        .query_service
        .catalog_types()
        .await
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// List catalog brands
pub async fn list_catalog_brands(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CatalogBrandIndex>>, (StatusCode, String)> {
    state
        .query_service
        .catalog_brands()
        .await
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// Get a catalog product by ID
pub async fn get_catalog_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CatalogProductIndex>, (StatusCode, String)> {
    let product_id: ProductId = id
        .parse()
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid product ID".to_string()))?;

    state
        .query_service
        .catalog_product(product_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Product not found".to_string()))
}

/// Get a location user record by ID
pub async fn get_location_user_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LocationUserRecord>, (StatusCode, String)> {
    let record_id: RecordId = id
        .parse()
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid record ID".to_string()))?;

    state
        .query_service
        .location_user_record(record_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Record not found".to_string()))
}
