//! Route configuration for the log ingestion API.

use std::sync::Arc;

use axum::routing::{get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers::{create_log, health_check, list_logs, route_not_found};
use crate::state::AppState;

/// Create the API router.
///
/// Every endpoint lives under `/api/v1`; anything else falls through to
/// the structured 404 handler.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(state.config());

    let api_routes = Router::new()
        // Log ingestion and querying
        .route("/logs", get(list_logs).post(create_log))
        // Health check
        .route("/health", get(health_check));

    Router::new()
        .nest("/api/v1", api_routes)
        .fallback(route_not_found)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &crate::config::ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<axum::http::HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(error) => {
                    warn!(origin = %origin, %error, "ignoring unparsable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
