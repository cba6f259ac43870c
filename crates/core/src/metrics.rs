//! Prometheus metrics for the search path.
//!
//! This module provides metrics for:
//! - Gateway searches (cache hits, fetches, failures)
//! - Upstream Prowlarr requests (status, latency, malformed bodies)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Gateway Metrics
// =============================================================================

/// Searches total by outcome.
pub static SEARCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("prowlarr_bridge_searches_total", "Total searches handled"),
        &["media_type", "outcome"], // outcome: "cache_hit", "fetched", "failed"
    )
    .unwrap()
});

/// Records returned per fetched search.
pub static SEARCH_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "prowlarr_bridge_search_results",
            "Number of release records returned per fetched search",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// Upstream Metrics
// =============================================================================

/// Upstream requests total by status.
pub static UPSTREAM_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "prowlarr_bridge_upstream_requests_total",
            "Total Prowlarr search requests",
        ),
        &["status"], // "success", "timeout", "unauthorized", "http_error", "connection_failed"
    )
    .unwrap()
});

/// Upstream request duration in seconds.
pub static UPSTREAM_DURATION: Lazy<prometheus::Histogram> = Lazy::new(|| {
    prometheus::Histogram::with_opts(
        HistogramOpts::new(
            "prowlarr_bridge_upstream_duration_seconds",
            "Duration of Prowlarr search requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 15.0, 30.0]),
    )
    .unwrap()
});

/// Response bodies that were not a JSON array.
pub static MALFORMED_RESPONSES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "prowlarr_bridge_malformed_responses_total",
        "Prowlarr responses treated as empty because they were not a JSON array",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(SEARCH_RESULTS.clone()),
        Box::new(UPSTREAM_REQUESTS.clone()),
        Box::new(UPSTREAM_DURATION.clone()),
        Box::new(MALFORMED_RESPONSES.clone()),
    ]
}
