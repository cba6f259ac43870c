//! User-editable connection settings and their persistence.
//!
//! The gateway never touches storage directly; it is handed a
//! [`SettingsStore`] and calls it when settings are loaded or saved.

mod descriptor;
mod store;

pub use descriptor::{ConfigDescriptor, ConfigField, FieldKind};
pub use store::{MemorySettingsStore, TomlSettingsStore};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ProwlarrConfig;

/// The persisted subset of the connection: host, port and API key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginSettings {
    #[serde(default)]
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub api_key: String,
}

impl From<&ProwlarrConfig> for PluginSettings {
    fn from(config: &ProwlarrConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            api_key: config.api_key.clone(),
        }
    }
}

/// Errors from settings persistence.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse stored settings: {0}")]
    Parse(String),

    #[error("Failed to serialize settings: {0}")]
    Serialize(String),
}

/// Storage collaborator for [`PluginSettings`].
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load persisted settings, `None` when nothing was saved yet.
    async fn load(&self) -> Result<Option<PluginSettings>, SettingsError>;

    /// Persist settings, replacing any previous copy.
    async fn save(&self, settings: &PluginSettings) -> Result<(), SettingsError>;
}
