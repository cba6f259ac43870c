//! Metadata the host needs to register the plugin.

use serde::{Deserialize, Serialize};

use crate::config::PluginConfig;
use crate::searcher::{MediaType, SOURCE_ID};

/// Plugin version reported to the host.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    pub media_types: Vec<MediaType>,
    pub icon_url: String,
}

impl PluginManifest {
    pub fn new(config: &PluginConfig) -> Self {
        Self {
            id: SOURCE_ID.to_string(),
            name: "Prowlarr".to_string(),
            version: PLUGIN_VERSION.to_string(),
            media_types: vec![MediaType::Movie, MediaType::Series],
            icon_url: config.icon_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_contents() {
        let manifest = PluginManifest::new(&PluginConfig::default());
        assert_eq!(manifest.id, "prowlarr");
        assert_eq!(manifest.name, "Prowlarr");
        assert_eq!(manifest.version, PLUGIN_VERSION);
        assert_eq!(
            manifest.media_types,
            vec![MediaType::Movie, MediaType::Series]
        );

        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["mediaTypes"], serde_json::json!(["movie", "series"]));
        assert!(json["iconUrl"].as_str().unwrap().starts_with("https://"));
    }
}
