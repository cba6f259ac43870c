//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the bridge server:
//! - HTTP request metrics (latency, counts)
//! - Cache and notice queue sizes (collected dynamically)
//!
//! Search and upstream metrics live in the core crate and are registered here.

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use tracing::warn;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "prowlarr_bridge_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("prowlarr_bridge_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "prowlarr_bridge_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Gateway Metrics (collected dynamically)
// =============================================================================

/// Search cache entries, expired ones included.
pub static CACHE_ENTRIES: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "prowlarr_bridge_cache_entries",
        "Number of entries in the search cache",
    )
    .unwrap()
});

/// Notices waiting to be drained by the host.
pub static NOTICES_PENDING: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "prowlarr_bridge_notices_pending",
        "Number of notices not yet drained",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Gateway
    registry.register(Box::new(CACHE_ENTRIES.clone())).unwrap();
    registry
        .register(Box::new(NOTICES_PENDING.clone()))
        .unwrap();

    // Core metrics (searches, upstream requests)
    for metric in prowlarr_bridge_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so the gauges reflect the gateway as it is now.
pub async fn collect_dynamic_metrics(state: &crate::state::AppState) {
    CACHE_ENTRIES.set(state.gateway().cached_entries().await as i64);
    NOTICES_PENDING.set(state.notices().len() as i64);
}
