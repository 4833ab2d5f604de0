//! HTTP REST API routes

mod command_routes;
mod query_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::infrastructure::state::AppState;

pub use command_routes::USER_HEADER;
pub use query_routes::BuyerQuery;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Commands
        .route("/command", post(command_routes::post_command))
        // Ordering
        .route("/buyer", get(query_routes::get_buyer))
        // Catalog
        .route("/catalog/types", get(query_routes::list_catalog_types))
        .route("/catalog/brands", get(query_routes::list_catalog_brands))
        .route(
            "/catalog/products/{id}",
            get(query_routes::get_catalog_product),
        )
        // Location
        .route(
            "/location/records/{id}",
            get(query_routes::get_location_user_record),
        )
}

/// The complete application router
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(create_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
