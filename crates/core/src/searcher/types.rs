//! Types for the Prowlarr search path.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::locale::Locale;

/// Constant `source` identifier stamped on every release record.
pub const SOURCE_ID: &str = "prowlarr";

/// Media type hint supplied by the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    /// Parse a host-supplied hint. Anything other than `"movie"` is a series.
    pub fn from_hint(hint: &str) -> Self {
        if hint == "movie" {
            MediaType::Movie
        } else {
            MediaType::Series
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
        }
    }

    /// Value of the Prowlarr `type` search parameter.
    pub fn search_type(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "tvsearch",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection parameters used for every upstream request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    pub timeout_ms: u64,
}

impl SearchConfig {
    /// Host and API key are both required before talking to Prowlarr.
    pub fn is_configured(&self) -> bool {
        !self.host.trim().is_empty() && !self.api_key.trim().is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// A normalized release, ready for the host catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRecord {
    /// Upstream guid, or a random token (display only).
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub poster_url: String,
    pub description: String,
    pub seeders: u32,
    pub leechers: u32,
    pub size_formatted: String,
    pub quality: String,
    pub source: String,
    pub magnet_uri: String,
    pub tracker_name: String,
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// Cover image attached to an upstream release.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProwlarrImage {
    #[serde(default, deserialize_with = "lenient")]
    pub cover_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}

/// One item of the Prowlarr `/api/v1/search` response.
///
/// Every field is optional; normalization supplies the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProwlarrRelease {
    #[serde(default, deserialize_with = "lenient")]
    pub guid: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub publish_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub images: Option<Vec<ProwlarrImage>>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub seeders: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub leechers: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub size: Option<i64>,
    /// Either a plain label or a `{ "name": .. }` / `{ "quality": { "name": .. } }` object.
    #[serde(default)]
    pub quality: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub magnet_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub indexer: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<f64>,
}

/// Null or mistyped values read as absent instead of failing the whole item.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], but also accepts floats (`1.5e9`) and numeric strings.
fn lenient_int<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let number = match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(number.and_then(|n| T::try_from(n).ok()))
}

/// Errors that can occur during search operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Prowlarr connection is not configured")]
    Unconfigured,

    #[error("Request timeout")]
    Timeout,

    #[error("Prowlarr rejected the API key")]
    Unauthorized,

    #[error("Prowlarr returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Search backend connection failed: {0}")]
    ConnectionFailed(String),
}

impl SearchError {
    /// Message shown to the user in the host UI.
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            SearchError::Unconfigured => locale.unconfigured().to_string(),
            SearchError::Timeout => locale.timed_out().to_string(),
            SearchError::Unauthorized => locale.invalid_api_key().to_string(),
            SearchError::HttpStatus(status) => locale.http_status(*status),
            SearchError::ConnectionFailed(_) => locale.unreachable().to_string(),
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::Unconfigured => "unconfigured",
            SearchError::Timeout => "timeout",
            SearchError::Unauthorized => "unauthorized",
            SearchError::HttpStatus(_) => "http_error",
            SearchError::ConnectionFailed(_) => "connection_failed",
        }
    }
}

/// Upstream source of raw releases.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Fetch raw releases for a query. Must issue at most one upstream request.
    async fn fetch(
        &self,
        config: &SearchConfig,
        query: &str,
        media_type: MediaType,
    ) -> Result<Vec<ProwlarrRelease>, SearchError>;
}
