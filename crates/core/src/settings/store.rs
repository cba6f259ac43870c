//! Settings store implementations.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

use super::{PluginSettings, SettingsError, SettingsStore};

/// Keeps settings in memory only. Used in tests and when persistence is off.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: RwLock<Option<PluginSettings>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: PluginSettings) -> Self {
        Self {
            settings: RwLock::new(Some(settings)),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<Option<PluginSettings>, SettingsError> {
        Ok(self.settings.read().await.clone())
    }

    async fn save(&self, settings: &PluginSettings) -> Result<(), SettingsError> {
        *self.settings.write().await = Some(settings.clone());
        Ok(())
    }
}

/// Persists settings as a small TOML file.
///
/// Writes go to a sibling temp file first and are then renamed over the
/// target, so a crash mid-write never leaves a truncated file behind.
#[derive(Debug, Clone)]
pub struct TomlSettingsStore {
    path: PathBuf,
}

impl TomlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SettingsStore for TomlSettingsStore {
    async fn load(&self) -> Result<Option<PluginSettings>, SettingsError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No stored settings");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let settings =
            toml::from_str(&contents).map_err(|e| SettingsError::Parse(e.to_string()))?;
        Ok(Some(settings))
    }

    async fn save(&self, settings: &PluginSettings) -> Result<(), SettingsError> {
        let contents =
            toml::to_string(settings).map_err(|e| SettingsError::Serialize(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}
