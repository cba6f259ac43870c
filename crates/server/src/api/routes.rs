use axum::{middleware::from_fn, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{handlers, middleware::metrics_middleware, notices, search, settings};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/manifest", get(handlers::get_manifest))
        // Search (cached, failures reported as notices)
        .route("/search", get(search::search))
        // Connection settings
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route("/notices", get(notices::drain_notices))
        .with_state(state.clone());

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics))
        .with_state(state);

    // The plugin runs inside a browser page served from another origin
    Router::new()
        .nest("/api/v1", api_routes)
        .merge(metrics_routes)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
