//! Gateway lifecycle integration tests.
//!
//! These tests drive the gateway through a mock release source and a manual
//! clock: cache hits and expiry, failure notices and settings changes.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use prowlarr_bridge_core::{
    testing::{fixtures, ManualClock, MockReleaseSource},
    GatewayOptions, Locale, MediaType, MemorySettingsStore, NoticeBoard, NoticeLevel,
    PluginSettings, SearchConfig, SearchError, SearchGateway, SettingsStore, TomlSettingsStore,
};

/// Test helper wiring a gateway to mocks.
struct TestHarness {
    gateway: Arc<SearchGateway>,
    source: Arc<MockReleaseSource>,
    clock: Arc<ManualClock>,
    notices: Arc<NoticeBoard>,
    store: Arc<MemorySettingsStore>,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_config(fixtures::search_config(), GatewayOptions::default())
    }

    fn with_config(config: SearchConfig, options: GatewayOptions) -> Self {
        let source = Arc::new(MockReleaseSource::new());
        let clock = Arc::new(ManualClock::default());
        let notices = Arc::new(NoticeBoard::default());
        let store = Arc::new(MemorySettingsStore::new());

        let gateway = SearchGateway::new(source.clone(), store.clone(), config, options)
            .with_clock(clock.clone())
            .with_notifier(notices.clone());

        Self {
            gateway: Arc::new(gateway),
            source,
            clock,
            notices,
            store,
        }
    }
}

#[tokio::test]
async fn test_repeat_search_within_ttl_is_served_from_cache() {
    let h = TestHarness::new();
    h.source
        .set_results(vec![
            fixtures::prowlarr_release("a", "Dune"),
            fixtures::prowlarr_release("b", "Dune Part Two"),
        ])
        .await;

    let first = h.gateway.search("Dune", MediaType::Movie).await;
    h.clock.advance(Duration::from_secs(299));
    let second = h.gateway.search("Dune", MediaType::Movie).await;

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(h.source.fetch_count().await, 1);
}

#[tokio::test]
async fn test_entry_expires_after_ttl() {
    let h = TestHarness::new();
    h.source
        .set_results(vec![fixtures::prowlarr_release("a", "Dune")])
        .await;

    h.gateway.search("Dune", MediaType::Movie).await;
    h.clock.advance(Duration::from_secs(301));
    h.gateway.search("Dune", MediaType::Movie).await;

    assert_eq!(h.source.fetch_count().await, 2);
}

#[tokio::test]
async fn test_expired_entry_is_replaced_by_fresh_fetch() {
    let h = TestHarness::new();
    h.source
        .set_results(vec![fixtures::prowlarr_release("old", "Dune")])
        .await;
    h.gateway.search("Dune", MediaType::Movie).await;

    h.clock.advance(Duration::from_secs(300));
    h.source
        .set_results(vec![fixtures::prowlarr_release("new", "Dune")])
        .await;
    let records = h.gateway.search("Dune", MediaType::Movie).await;

    assert_eq!(records[0].id, "new");
    assert_eq!(h.gateway.cached_entries().await, 1);
}

#[tokio::test]
async fn test_custom_ttl() {
    let options = GatewayOptions {
        cache_ttl: Duration::from_secs(5),
        ..GatewayOptions::default()
    };
    let h = TestHarness::with_config(fixtures::search_config(), options);

    h.gateway.search("Dune", MediaType::Movie).await;
    h.clock.advance(Duration::from_secs(4));
    h.gateway.search("Dune", MediaType::Movie).await;
    assert_eq!(h.source.fetch_count().await, 1);

    h.clock.advance(Duration::from_secs(2));
    h.gateway.search("Dune", MediaType::Movie).await;
    assert_eq!(h.source.fetch_count().await, 2);
}

#[tokio::test]
async fn test_cache_key_includes_media_type() {
    let h = TestHarness::new();

    let movies = h.gateway.search("Fargo", MediaType::Movie).await;
    let series = h.gateway.search("Fargo", MediaType::Series).await;
    assert!(movies.is_empty() && series.is_empty());

    let fetches = h.source.recorded_fetches().await;
    assert_eq!(fetches.len(), 2);
    assert_eq!(fetches[0].media_type, MediaType::Movie);
    assert_eq!(fetches[1].media_type, MediaType::Series);
}

#[tokio::test]
async fn test_cache_key_is_case_sensitive() {
    let h = TestHarness::new();
    h.gateway.search("dune", MediaType::Movie).await;
    h.gateway.search("Dune", MediaType::Movie).await;
    assert_eq!(h.source.fetch_count().await, 2);
}

#[tokio::test]
async fn test_records_echo_requested_media_type() {
    let h = TestHarness::new();
    h.source
        .set_results(vec![fixtures::prowlarr_release("a", "Fargo")])
        .await;

    let records = h.gateway.search("Fargo", MediaType::Series).await;
    assert_eq!(records[0].media_type, MediaType::Series);
    assert_eq!(records[0].source, "prowlarr");
    assert_eq!(records[0].quality, "1080p");
    assert_eq!(records[0].size_formatted, "4 GB");
}

#[tokio::test]
async fn test_empty_result_is_cached() {
    let h = TestHarness::new();

    assert!(h.gateway.search("nothing", MediaType::Movie).await.is_empty());
    assert!(h.gateway.search("nothing", MediaType::Movie).await.is_empty());

    assert_eq!(h.source.fetch_count().await, 1);
    assert!(h.notices.is_empty());
}

#[tokio::test]
async fn test_failures_emit_localized_notices() {
    let cases = [
        (SearchError::Timeout, "Prowlarr: connection timed out"),
        (SearchError::Unauthorized, "Prowlarr: invalid API key"),
        (
            SearchError::HttpStatus(500),
            "Prowlarr: server returned status 500",
        ),
        (
            SearchError::ConnectionFailed("refused".to_string()),
            "Prowlarr: could not reach the server",
        ),
    ];

    for (error, message) in cases {
        let h = TestHarness::new();
        h.source.set_next_error(error).await;

        let records = h.gateway.search("Dune", MediaType::Movie).await;
        assert!(records.is_empty());

        let notices = h.notices.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].message, message);
    }
}

#[tokio::test]
async fn test_notices_follow_configured_locale() {
    let mut options = GatewayOptions::default();
    options.plugin.locale = Locale::Ru;
    let h = TestHarness::with_config(fixtures::search_config(), options);
    h.source.set_next_error(SearchError::Unauthorized).await;

    h.gateway.search("Dune", MediaType::Movie).await;
    assert_eq!(
        h.notices.drain()[0].message,
        Locale::Ru.invalid_api_key().to_string()
    );
}

#[tokio::test]
async fn test_failed_search_is_retried_on_next_call() {
    let h = TestHarness::new();
    h.source.set_next_error(SearchError::Timeout).await;
    h.source
        .set_results(vec![fixtures::prowlarr_release("a", "Dune")])
        .await;

    assert!(h.gateway.search("Dune", MediaType::Movie).await.is_empty());
    assert_eq!(h.gateway.cached_entries().await, 0);

    let records = h.gateway.search("Dune", MediaType::Movie).await;
    assert_eq!(records.len(), 1);
    assert_eq!(h.source.fetch_count().await, 2);
}

#[tokio::test]
async fn test_unconfigured_never_reaches_upstream() {
    for (host, api_key) in [("", "key"), ("localhost", ""), ("  ", "  ")] {
        let config = SearchConfig {
            host: host.to_string(),
            api_key: api_key.to_string(),
            ..fixtures::search_config()
        };
        let h = TestHarness::with_config(config, GatewayOptions::default());

        assert!(h.gateway.search("Dune", MediaType::Movie).await.is_empty());
        assert_eq!(h.source.fetch_count().await, 0);
        assert_eq!(
            h.notices.drain()[0].message,
            "Prowlarr: configure the connection first"
        );
    }
}

#[tokio::test]
async fn test_concurrent_misses_are_not_coalesced() {
    let h = TestHarness::new();
    h.source.set_delay(Some(Duration::from_millis(50))).await;

    let searches = (0..3).map(|_| h.gateway.search("Dune", MediaType::Movie));
    let results = futures::future::join_all(searches).await;

    assert_eq!(results.len(), 3);
    assert_eq!(h.source.fetch_count().await, 3);
    assert_eq!(h.gateway.cached_entries().await, 1);
}

#[tokio::test]
async fn test_update_settings_persists_and_applies() {
    let h = TestHarness::new();
    let settings = PluginSettings {
        host: "prowlarr.lan".to_string(),
        port: 8080,
        api_key: "fresh-key".to_string(),
    };

    h.gateway.update_settings(settings.clone()).await.unwrap();

    assert_eq!(h.store.load().await.unwrap(), Some(settings));
    let config = h.gateway.settings().await;
    assert_eq!(config.host, "prowlarr.lan");
    assert_eq!(config.port, 8080);
    assert_eq!(config.api_key, "fresh-key");
}

#[tokio::test]
async fn test_update_settings_drops_cached_results() {
    let h = TestHarness::new();
    h.gateway.search("Dune", MediaType::Movie).await;

    h.gateway
        .update_settings(fixtures::plugin_settings())
        .await
        .unwrap();
    h.gateway.search("Dune", MediaType::Movie).await;

    assert_eq!(h.source.fetch_count().await, 2);
}

#[tokio::test]
async fn test_settings_survive_restart_through_toml_store() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("settings.toml");

    let first = SearchGateway::new(
        Arc::new(MockReleaseSource::new()),
        Arc::new(TomlSettingsStore::new(&path)),
        fixtures::search_config(),
        GatewayOptions::default(),
    );
    first
        .update_settings(PluginSettings {
            host: "10.0.0.5".to_string(),
            port: 9697,
            api_key: "persisted".to_string(),
        })
        .await
        .unwrap();

    let second = SearchGateway::new(
        Arc::new(MockReleaseSource::new()),
        Arc::new(TomlSettingsStore::new(&path)),
        SearchConfig {
            host: String::new(),
            api_key: String::new(),
            ..fixtures::search_config()
        },
        GatewayOptions::default(),
    );
    assert!(second.load_settings().await.unwrap());

    let config = second.settings().await;
    assert_eq!(config.host, "10.0.0.5");
    assert_eq!(config.port, 9697);
    assert_eq!(config.api_key, "persisted");
}

#[tokio::test]
async fn test_descriptor_never_exposes_api_key() {
    let h = TestHarness::new();
    let descriptor = h.gateway.config_descriptor().await;

    let json = serde_json::to_string(&descriptor).unwrap();
    assert!(!json.contains(&fixtures::search_config().api_key));
    assert!(descriptor.field("api_key").unwrap().is_set);
}
