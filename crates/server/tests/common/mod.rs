//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock release source, an in-memory settings store and a manual
//! clock, so the HTTP surface can be exercised without a Prowlarr instance.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use prowlarr_bridge_core::{
    testing::{ManualClock, MockReleaseSource},
    Config, MemorySettingsStore, NoticeBoard, SearchGateway,
};
use prowlarr_bridge_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use prowlarr_bridge_core::testing::fixtures;

/// Test fixture with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new().await;
///     fixture.source.set_results(vec![fixtures::prowlarr_release("g1", "Dune")]).await;
///
///     let response = fixture.get("/api/v1/search?query=Dune&type=movie").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock release source - configure upstream results and failures
    pub source: Arc<MockReleaseSource>,
    /// Settings store backing the gateway
    pub store: Arc<MemorySettingsStore>,
    /// Clock driving cache expiry
    pub clock: Arc<ManualClock>,
    pub notices: Arc<NoticeBoard>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Response with an unparsed body
#[derive(Debug)]
pub struct TextResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestFixture {
    /// Create a fixture with a configured Prowlarr connection.
    pub async fn new() -> Self {
        let mut config = Config::default();
        let connection = fixtures::search_config();
        config.prowlarr.host = connection.host;
        config.prowlarr.port = connection.port;
        config.prowlarr.api_key = connection.api_key;
        Self::with_config(config).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(config: Config) -> Self {
        let source = Arc::new(MockReleaseSource::new());
        let store = Arc::new(MemorySettingsStore::new());
        let clock = Arc::new(ManualClock::default());
        let notices = Arc::new(NoticeBoard::default());

        let gateway = SearchGateway::from_config(&config, source.clone(), store.clone())
            .with_clock(clock.clone())
            .with_notifier(notices.clone());

        let state = Arc::new(AppState::new(config, Arc::new(gateway), notices.clone()));
        let router = create_router(state);

        Self {
            router,
            source,
            store,
            clock,
            notices,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a PUT request with raw string body (for testing malformed JSON).
    pub async fn put_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("PUT")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let (status, _, bytes) = self.send(request).await;
        TestResponse {
            status,
            body: parse_json(&bytes),
        }
    }

    /// Send a GET request and keep the body as text.
    pub async fn get_text(&self, path: &str) -> TextResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let (status, content_type, bytes) = self.send(request).await;
        TextResponse {
            status,
            content_type,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        let (status, _, bytes) = self.send(request).await;

        TestResponse {
            status,
            body: parse_json(&bytes),
        }
    }

    /// Send a prebuilt request and return the full response.
    pub async fn send_raw(&self, request: Request<Body>) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = self.send_raw(request).await;

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, content_type, body_bytes.to_vec())
    }
}

fn parse_json(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(bytes).unwrap_or(Value::Null)
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
