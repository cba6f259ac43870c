//! Prowlarr search backend implementation.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ProwlarrConfig;
use crate::metrics::{MALFORMED_RESPONSES, UPSTREAM_DURATION, UPSTREAM_REQUESTS};

use super::{MediaType, ProwlarrRelease, ReleaseSource, SearchConfig, SearchError};

/// Explicit HTTP client settings for upstream calls.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// The embedding page is served over https; talk to Prowlarr over https too.
    pub secure_context: bool,
    pub user_agent: String,
    /// Extra headers sent with every request.
    pub default_headers: Vec<(String, String)>,
}

impl From<&ProwlarrConfig> for HttpClientConfig {
    fn from(config: &ProwlarrConfig) -> Self {
        Self {
            secure_context: config.secure_context,
            user_agent: config.user_agent.clone(),
            default_headers: Vec::new(),
        }
    }
}

/// Errors building the HTTP client.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("Invalid default header: {0}")]
    InvalidHeader(String),

    #[error("Failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Prowlarr search backend.
pub struct ProwlarrClient {
    client: Client,
    secure_context: bool,
}

impl ProwlarrClient {
    /// Create a new client. Timeouts are applied per request from [`SearchConfig`].
    pub fn new(http: HttpClientConfig) -> Result<Self, ClientBuildError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &http.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ClientBuildError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| ClientBuildError::InvalidHeader(name.to_string()))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .user_agent(http.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            secure_context: http.secure_context,
        })
    }

    fn scheme(&self) -> &'static str {
        if self.secure_context {
            "https"
        } else {
            "http"
        }
    }

    /// Build the Prowlarr search URL.
    fn build_search_url(&self, config: &SearchConfig, query: &str, media_type: MediaType) -> String {
        let host = config
            .host
            .trim()
            .trim_start_matches("http://")
            .trim_start_matches("https://")
            .trim_end_matches('/');

        format!(
            "{}://{}:{}/api/v1/search?query={}&type={}&apikey={}",
            self.scheme(),
            host,
            config.port,
            urlencoding::encode(query),
            media_type.search_type(),
            urlencoding::encode(&config.api_key)
        )
    }

    async fn fetch_body(&self, url: &str) -> Result<Vec<u8>, SearchError> {
        let response = self.client.get(url).send().await.map_err(map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SearchError::Unauthorized);
        }
        if !status.is_success() {
            return Err(SearchError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl ReleaseSource for ProwlarrClient {
    fn name(&self) -> &str {
        "prowlarr"
    }

    async fn fetch(
        &self,
        config: &SearchConfig,
        query: &str,
        media_type: MediaType,
    ) -> Result<Vec<ProwlarrRelease>, SearchError> {
        let url = self.build_search_url(config, query, media_type);
        debug!(host = %config.host, query = %query, media_type = %media_type, "Searching Prowlarr");

        let start = Instant::now();
        let outcome = match tokio::time::timeout(config.timeout(), self.fetch_body(&url)).await {
            Ok(result) => result,
            Err(_) => Err(SearchError::Timeout),
        };
        UPSTREAM_DURATION.observe(start.elapsed().as_secs_f64());

        let status = match &outcome {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        UPSTREAM_REQUESTS.with_label_values(&[status]).inc();

        let body = outcome.inspect_err(|e| {
            warn!(error = %e, "Prowlarr search failed");
        })?;

        let releases = parse_releases(&body);
        debug!(results = releases.len(), "Prowlarr search complete");
        Ok(releases)
    }
}

fn map_transport_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::ConnectionFailed(e.to_string())
    }
}

/// Parse a search response body.
///
/// Anything other than a JSON array yields no releases; array elements that
/// are not release objects are skipped.
fn parse_releases(body: &[u8]) -> Vec<ProwlarrRelease> {
    let items = match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(other) => {
            warn!(kind = json_kind(&other), "Prowlarr response is not an array");
            MALFORMED_RESPONSES.inc();
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Prowlarr response is not valid JSON");
            MALFORMED_RESPONSES.inc();
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(release) => Some(release),
            Err(e) => {
                debug!(error = %e, "Skipping unreadable release");
                None
            }
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
