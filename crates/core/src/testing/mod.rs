//! Testing utilities: a controllable release source, a manual clock and
//! fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use prowlarr_bridge_core::testing::{fixtures, ManualClock, MockReleaseSource};
//!
//! let source = Arc::new(MockReleaseSource::new());
//! let clock = Arc::new(ManualClock::default());
//!
//! let gateway = SearchGateway::new(source.clone(), store, fixtures::search_config(), options)
//!     .with_clock(clock.clone());
//!
//! clock.advance(Duration::from_secs(301));
//! ```

mod mock_source;

pub use mock_source::{MockReleaseSource, RecordedFetch};

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Mutex;
use std::time::Duration;

use crate::clock::Clock;

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let by = chrono::TimeDelta::from_std(by).unwrap_or(chrono::TimeDelta::MAX);
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = at;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::searcher::{
        MediaType, ProwlarrImage, ProwlarrRelease, ReleaseRecord, SearchConfig, SOURCE_ID,
    };
    use crate::settings::PluginSettings;

    /// A configured connection pointing at a local Prowlarr.
    pub fn search_config() -> SearchConfig {
        SearchConfig {
            host: "localhost".to_string(),
            port: 9696,
            api_key: "test-api-key".to_string(),
            timeout_ms: 10_000,
        }
    }

    pub fn plugin_settings() -> PluginSettings {
        let config = search_config();
        PluginSettings {
            host: config.host,
            port: config.port,
            api_key: config.api_key,
        }
    }

    /// An upstream release with the fields a typical indexer fills in.
    pub fn prowlarr_release(guid: &str, title: &str) -> ProwlarrRelease {
        ProwlarrRelease {
            guid: Some(guid.to_string()),
            title: Some(title.to_string()),
            year: Some(2021),
            publish_date: Some("2021-10-22T08:00:00Z".to_string()),
            images: Some(vec![ProwlarrImage {
                cover_type: Some("poster".to_string()),
                url: Some(format!("https://images.example/{}.jpg", guid)),
            }]),
            description: Some(format!("{} release", title)),
            seeders: Some(120),
            leechers: Some(8),
            size: Some(4 * 1024 * 1024 * 1024),
            quality: Some(serde_json::json!("1080p")),
            magnet_url: Some(format!("magnet:?xt=urn:btih:{}", guid)),
            indexer: Some("mock-indexer".to_string()),
            rating: Some(7.9),
        }
    }

    /// A normalized record, as stored in the cache.
    pub fn release_record(id: &str, media_type: MediaType) -> ReleaseRecord {
        ReleaseRecord {
            id: id.to_string(),
            title: format!("Release {}", id),
            year: Some(2021),
            poster_url: format!("https://images.example/{}.jpg", id),
            description: String::new(),
            seeders: 10,
            leechers: 2,
            size_formatted: "1.5 GB".to_string(),
            quality: "1080p".to_string(),
            source: SOURCE_ID.to_string(),
            magnet_uri: format!("magnet:?xt=urn:btih:{}", id),
            tracker_name: "mock-indexer".to_string(),
            media_type,
            rating: None,
        }
    }
}
