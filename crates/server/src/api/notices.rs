use std::sync::Arc;

use axum::{extract::State, Json};
use prowlarr_bridge_core::Notice;

use crate::state::AppState;

/// GET /api/v1/notices
///
/// Returns pending notices, oldest first, and clears them.
pub async fn drain_notices(State(state): State<Arc<AppState>>) -> Json<Vec<Notice>> {
    Json(state.notices().drain())
}
