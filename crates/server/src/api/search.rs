//! Search API handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use prowlarr_bridge_core::{MediaType, ReleaseRecord};
use serde::Deserialize;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    /// `movie`; anything else searches series.
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
}

/// GET /api/v1/search
///
/// Always answers 200. Upstream failures produce an empty list and a notice
/// available from `/api/v1/notices`.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<ReleaseRecord>> {
    let media_type = MediaType::from_hint(params.media_type.as_deref().unwrap_or_default());
    Json(state.gateway().search(&params.query, media_type).await)
}
