//! Connection settings API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use prowlarr_bridge_core::{ConfigDescriptor, PluginSettings};
use tracing::error;

use super::handlers::ErrorResponse;
use crate::state::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// GET /api/v1/settings
///
/// The settings form with current values. The API key is never returned.
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<ConfigDescriptor> {
    Json(state.gateway().config_descriptor().await)
}

/// PUT /api/v1/settings
///
/// Persist and apply new connection settings. Cached results are dropped.
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PluginSettings>,
) -> Result<Json<ConfigDescriptor>, ApiError> {
    if body.port == 0 {
        return Err(api_error(StatusCode::BAD_REQUEST, "port cannot be 0"));
    }

    state.gateway().update_settings(body).await.map_err(|e| {
        error!("Failed to save settings: {}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(state.gateway().config_descriptor().await))
}
