//! The cached, timeout-bounded search entry point used by the host.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::{Config, PluginConfig, ProwlarrConfig};
use crate::locale::Locale;
use crate::metrics::{SEARCHES_TOTAL, SEARCH_RESULTS};
use crate::notify::{Notice, Notifier, TracingNotifier};
use crate::plugin::PluginManifest;
use crate::settings::{ConfigDescriptor, PluginSettings, SettingsError, SettingsStore};

use super::cache::{cache_key, SearchCache};
use super::normalize::{normalize_releases, NormalizeOptions};
use super::{MediaType, ReleaseRecord, ReleaseSource, SearchConfig, SearchError};

impl From<&ProwlarrConfig> for SearchConfig {
    fn from(config: &ProwlarrConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            api_key: config.api_key.clone(),
            timeout_ms: config.timeout_ms,
        }
    }
}

/// Gateway behaviour that does not change at runtime.
#[derive(Debug, Clone)]
pub struct GatewayOptions {
    pub cache_ttl: Duration,
    pub plugin: PluginConfig,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for GatewayOptions {
    fn from(config: &Config) -> Self {
        Self {
            cache_ttl: Duration::from_secs(config.cache.ttl_secs),
            plugin: config.plugin.clone(),
        }
    }
}

/// Resolves `(query, media type)` to normalized release records.
///
/// Owns the connection config and the result cache. Persistence, time, user
/// notices and the upstream itself are injected.
pub struct SearchGateway {
    source: Arc<dyn ReleaseSource>,
    store: Arc<dyn SettingsStore>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    config: RwLock<SearchConfig>,
    /// Cleared on every settings change; fetches started before the clear
    /// do not populate it.
    cache: SearchCache,
    options: GatewayOptions,
    normalize: NormalizeOptions,
}

impl SearchGateway {
    pub fn new(
        source: Arc<dyn ReleaseSource>,
        store: Arc<dyn SettingsStore>,
        config: SearchConfig,
        options: GatewayOptions,
    ) -> Self {
        let normalize = NormalizeOptions {
            locale: options.plugin.locale,
            placeholder_poster_url: options.plugin.placeholder_poster_url.clone(),
        };

        Self {
            source,
            store,
            clock: Arc::new(SystemClock),
            notifier: Arc::new(TracingNotifier),
            config: RwLock::new(config),
            cache: SearchCache::new(options.cache_ttl),
            options,
            normalize,
        }
    }

    /// Build a gateway from application configuration.
    pub fn from_config(
        config: &Config,
        source: Arc<dyn ReleaseSource>,
        store: Arc<dyn SettingsStore>,
    ) -> Self {
        Self::new(
            source,
            store,
            SearchConfig::from(&config.prowlarr),
            GatewayOptions::from(config),
        )
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Search Prowlarr, serving live cache entries without an upstream call.
    ///
    /// Never fails: errors become an empty result plus a user notice.
    pub async fn search(&self, query: &str, media_type: MediaType) -> Vec<ReleaseRecord> {
        match self.lookup(query, media_type).await {
            Ok(records) => records,
            Err(e) => {
                SEARCHES_TOTAL
                    .with_label_values(&[media_type.as_str(), "failed"])
                    .inc();
                self.notifier.notify(Notice::error(
                    e.user_message(self.locale()),
                    self.clock.now(),
                ));
                Vec::new()
            }
        }
    }

    async fn lookup(
        &self,
        query: &str,
        media_type: MediaType,
    ) -> Result<Vec<ReleaseRecord>, SearchError> {
        let key = cache_key(media_type, query);

        if let Some(records) = self.cache.get(&key, self.clock.now()).await {
            debug!(key = %key, results = records.len(), "Search served from cache");
            SEARCHES_TOTAL
                .with_label_values(&[media_type.as_str(), "cache_hit"])
                .inc();
            return Ok(records);
        }

        let generation = self.cache.generation().await;
        let config = self.config.read().await.clone();
        if !config.is_configured() {
            return Err(SearchError::Unconfigured);
        }

        let releases = self.source.fetch(&config, query, media_type).await?;
        let records = normalize_releases(releases, media_type, &self.normalize);

        let stored = self
            .cache
            .insert_if_current(generation, key.clone(), records.clone(), self.clock.now())
            .await;
        if !stored {
            debug!(key = %key, "Settings changed during fetch, not caching");
        }

        SEARCHES_TOTAL
            .with_label_values(&[media_type.as_str(), "fetched"])
            .inc();
        SEARCH_RESULTS
            .with_label_values(&[])
            .observe(records.len() as f64);
        debug!(
            source = self.source.name(),
            results = records.len(),
            "Search fetched from upstream"
        );

        Ok(records)
    }

    /// Current connection config.
    pub async fn settings(&self) -> SearchConfig {
        self.config.read().await.clone()
    }

    /// Current persisted-settings view of the connection.
    pub async fn plugin_settings(&self) -> PluginSettings {
        let config = self.config.read().await;
        PluginSettings {
            host: config.host.clone(),
            port: config.port,
            api_key: config.api_key.clone(),
        }
    }

    /// Persist new settings and apply them. Cached results are dropped.
    ///
    /// If saving fails the current settings stay in effect.
    pub async fn update_settings(&self, settings: PluginSettings) -> Result<(), SettingsError> {
        self.store.save(&settings).await?;
        self.apply_settings(settings).await;
        Ok(())
    }

    /// Apply persisted settings, if any. Returns whether any were found.
    pub async fn load_settings(&self) -> Result<bool, SettingsError> {
        match self.store.load().await? {
            Some(settings) => {
                self.apply_settings(settings).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn apply_settings(&self, settings: PluginSettings) {
        {
            let mut config = self.config.write().await;
            config.host = settings.host;
            config.port = settings.port;
            config.api_key = settings.api_key;
            info!(host = %config.host, port = config.port, "Prowlarr settings applied");
        }
        self.cache.clear().await;
    }

    /// Settings form for the host UI.
    pub async fn config_descriptor(&self) -> ConfigDescriptor {
        ConfigDescriptor::for_settings(&self.plugin_settings().await, self.locale())
    }

    pub fn manifest(&self) -> PluginManifest {
        PluginManifest::new(&self.options.plugin)
    }

    /// Number of cache entries, expired ones included.
    pub async fn cached_entries(&self) -> usize {
        self.cache.len().await
    }

    pub fn locale(&self) -> Locale {
        self.options.plugin.locale
    }
}
