//! Typed description of the settings form handed to the host.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

use super::PluginSettings;

/// How the host should render and treat a field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Secret,
}

/// A single editable field with its current value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    /// Current value. Always `None` for secret fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Whether a value is currently set.
    pub is_set: bool,
}

/// The full settings form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigDescriptor {
    pub fields: Vec<ConfigField>,
}

impl ConfigDescriptor {
    pub fn for_settings(settings: &PluginSettings, locale: Locale) -> Self {
        let field = |key: &str, kind: FieldKind, value: String| {
            let is_set = !value.is_empty();
            ConfigField {
                key: key.to_string(),
                label: locale.field_label(key).to_string(),
                kind,
                value: match kind {
                    FieldKind::Secret => None,
                    _ => Some(value),
                },
                is_set,
            }
        };

        Self {
            fields: vec![
                field("host", FieldKind::Text, settings.host.clone()),
                field("port", FieldKind::Number, settings.port.to_string()),
                field("api_key", FieldKind::Secret, settings.api_key.clone()),
            ],
        }
    }

    pub fn field(&self, key: &str) -> Option<&ConfigField> {
        self.fields.iter().find(|f| f.key == key)
    }
}
