use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::locale::Locale;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub prowlarr: ProwlarrConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub plugin: PluginConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8787
}

/// Prowlarr connection configuration.
///
/// `host`, `port` and `api_key` are only the initial values: once the user
/// saves settings through the plugin, the persisted copy wins.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProwlarrConfig {
    /// Prowlarr host name or address (no scheme).
    #[serde(default)]
    pub host: String,
    /// Prowlarr port (default: 9696).
    #[serde(default = "default_prowlarr_port")]
    pub port: u16,
    /// Prowlarr API key.
    #[serde(default)]
    pub api_key: String,
    /// Upstream request timeout in milliseconds (default: 10000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Whether the embedding page is served over https.
    /// Selects the upstream scheme to avoid mixed-content blocking.
    #[serde(default)]
    pub secure_context: bool,
    /// User-Agent sent upstream.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ProwlarrConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_prowlarr_port(),
            api_key: String::new(),
            timeout_ms: default_timeout_ms(),
            secure_context: false,
            user_agent: default_user_agent(),
        }
    }
}

fn default_prowlarr_port() -> u16 {
    9696
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    format!("prowlarr-bridge/{}", env!("CARGO_PKG_VERSION"))
}

/// Search result cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// How long a search result is served from cache (default: 300).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    300
}

/// Where user-edited connection settings are persisted
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SettingsConfig {
    #[serde(default = "default_settings_path")]
    pub path: PathBuf,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: default_settings_path(),
        }
    }
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("prowlarr-settings.toml")
}

/// Plugin presentation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PluginConfig {
    /// Language for notices and placeholders.
    #[serde(default)]
    pub locale: Locale,
    /// Icon shown by the host next to the plugin name.
    #[serde(default = "default_icon_url")]
    pub icon_url: String,
    /// Poster used when a release carries no poster image.
    #[serde(default = "default_placeholder_poster_url")]
    pub placeholder_poster_url: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            icon_url: default_icon_url(),
            placeholder_poster_url: default_placeholder_poster_url(),
        }
    }
}

fn default_icon_url() -> String {
    "https://cdn.jsdelivr.net/gh/homarr-labs/dashboard-icons/svg/prowlarr.svg".to_string()
}

fn default_placeholder_poster_url() -> String {
    "https://via.placeholder.com/300x450?text=No+Poster".to_string()
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub prowlarr: SanitizedProwlarrConfig,
    pub cache: CacheConfig,
    pub settings: SettingsConfig,
    pub plugin: PluginConfig,
}

/// Sanitized Prowlarr config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedProwlarrConfig {
    pub host: String,
    pub port: u16,
    pub api_key_configured: bool,
    pub timeout_ms: u64,
    pub secure_context: bool,
    pub user_agent: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let p = &config.prowlarr;
        Self {
            server: config.server.clone(),
            prowlarr: SanitizedProwlarrConfig {
                host: p.host.clone(),
                port: p.port,
                api_key_configured: !p.api_key.is_empty(),
                timeout_ms: p.timeout_ms,
                secure_context: p.secure_context,
                user_agent: p.user_agent.clone(),
            },
            cache: config.cache.clone(),
            settings: config.settings.clone(),
            plugin: config.plugin.clone(),
        }
    }
}
