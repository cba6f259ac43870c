//! Mock release source for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::searcher::{MediaType, ProwlarrRelease, ReleaseSource, SearchConfig, SearchError};

/// A recorded upstream fetch for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedFetch {
    pub query: String,
    pub media_type: MediaType,
    /// Connection config in effect for the fetch.
    pub config: SearchConfig,
    pub timestamp: Instant,
}

/// Mock implementation of [`ReleaseSource`].
///
/// Returns configured releases (per query, or a default set), records every
/// fetch, and can simulate failures and slow upstreams.
///
/// # Example
///
/// ```rust,ignore
/// use prowlarr_bridge_core::testing::{fixtures, MockReleaseSource};
///
/// let source = MockReleaseSource::new();
/// source.set_results(vec![fixtures::prowlarr_release("g1", "Dune")]).await;
/// source.set_next_error(SearchError::Timeout).await;
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockReleaseSource {
    results: Arc<RwLock<Vec<ProwlarrRelease>>>,
    results_by_query: Arc<RwLock<HashMap<String, Vec<ProwlarrRelease>>>>,
    fetches: Arc<RwLock<Vec<RecordedFetch>>>,
    /// If set, the next fetch fails with this error.
    next_error: Arc<RwLock<Option<SearchError>>>,
    /// If set, every fetch fails with this error.
    error: Arc<RwLock<Option<SearchError>>>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockReleaseSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the releases returned for any query without a specific entry.
    pub async fn set_results(&self, results: Vec<ProwlarrRelease>) {
        *self.results.write().await = results;
    }

    /// Set the releases returned for one query string.
    pub async fn set_results_for(&self, query: &str, results: Vec<ProwlarrRelease>) {
        self.results_by_query
            .write()
            .await
            .insert(query.to_string(), results);
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Configure every fetch to fail until cleared.
    pub async fn set_error(&self, error: Option<SearchError>) {
        *self.error.write().await = error;
    }

    /// Delay every fetch by the given duration.
    pub async fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.write().await = delay;
    }

    pub async fn recorded_fetches(&self) -> Vec<RecordedFetch> {
        self.fetches.read().await.clone()
    }

    pub async fn fetch_count(&self) -> usize {
        self.fetches.read().await.len()
    }

    pub async fn clear_recorded(&self) {
        self.fetches.write().await.clear();
    }
}

#[async_trait]
impl ReleaseSource for MockReleaseSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(
        &self,
        config: &SearchConfig,
        query: &str,
        media_type: MediaType,
    ) -> Result<Vec<ProwlarrRelease>, SearchError> {
        self.fetches.write().await.push(RecordedFetch {
            query: query.to_string(),
            media_type,
            config: config.clone(),
            timestamp: Instant::now(),
        });

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        if let Some(error) = self.error.read().await.clone() {
            return Err(error);
        }

        if let Some(results) = self.results_by_query.read().await.get(query) {
            return Ok(results.clone());
        }
        Ok(self.results.read().await.clone())
    }
}
