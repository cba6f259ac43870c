//! Search result cache with lazy, read-time expiry.
//!
//! Entries are never swept: an expired entry is simply treated as a miss and
//! is overwritten by the next successful fetch for the same key.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

use super::{MediaType, ReleaseRecord};

/// Build the cache key for a search: `"<mediaType>:<query>"`, case-sensitive.
pub fn cache_key(media_type: MediaType, query: &str) -> String {
    format!("{}:{}", media_type.as_str(), query)
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<ReleaseRecord>,
    inserted_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    /// Bumped by [`SearchCache::clear`].
    generation: u64,
}

/// Thread-safe map of search results keyed by [`cache_key`].
#[derive(Debug)]
pub struct SearchCache {
    ttl: TimeDelta,
    state: RwLock<CacheState>,
}

impl SearchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Return the cached value if it is still live at `now`.
    pub async fn get(&self, key: &str, now: DateTime<Utc>) -> Option<Vec<ReleaseRecord>> {
        let state = self.state.read().await;
        state
            .entries
            .get(key)
            .filter(|entry| now - entry.inserted_at < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Current generation. Pass it back to [`SearchCache::insert_if_current`].
    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    /// Store a value, replacing any previous (live or expired) entry, unless
    /// the cache has been cleared since `generation` was read. Returns whether
    /// the value was stored.
    pub async fn insert_if_current(
        &self,
        generation: u64,
        key: String,
        value: Vec<ReleaseRecord>,
        now: DateTime<Utc>,
    ) -> bool {
        let mut state = self.state.write().await;
        if state.generation != generation {
            return false;
        }
        state.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: now,
            },
        );
        true
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }

    /// Drop every entry and start a new generation.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.entries.clear();
        state.generation += 1;
    }
}
