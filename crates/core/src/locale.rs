//! User-facing strings in the languages the plugin ships with.

use serde::{Deserialize, Serialize};

/// Language used for notices and placeholders.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    /// Placeholder title for releases without one.
    pub fn untitled(self) -> &'static str {
        match self {
            Locale::En => "Untitled",
            Locale::Ru => "Без названия",
        }
    }

    pub fn timed_out(self) -> &'static str {
        match self {
            Locale::En => "Prowlarr: connection timed out",
            Locale::Ru => "Prowlarr: превышено время ожидания",
        }
    }

    pub fn invalid_api_key(self) -> &'static str {
        match self {
            Locale::En => "Prowlarr: invalid API key",
            Locale::Ru => "Prowlarr: неверный API ключ",
        }
    }

    pub fn http_status(self, status: u16) -> String {
        match self {
            Locale::En => format!("Prowlarr: server returned status {}", status),
            Locale::Ru => format!("Prowlarr: сервер вернул статус {}", status),
        }
    }

    pub fn unreachable(self) -> &'static str {
        match self {
            Locale::En => "Prowlarr: could not reach the server",
            Locale::Ru => "Prowlarr: сервер недоступен",
        }
    }

    pub fn unconfigured(self) -> &'static str {
        match self {
            Locale::En => "Prowlarr: configure the connection first",
            Locale::Ru => "Prowlarr: сначала настройте подключение",
        }
    }

    /// Labels for the settings form, keyed by field.
    pub fn field_label(self, key: &str) -> &'static str {
        match (self, key) {
            (Locale::En, "host") => "Prowlarr host",
            (Locale::En, "port") => "Prowlarr port",
            (Locale::En, "api_key") => "API key",
            (Locale::Ru, "host") => "Адрес Prowlarr",
            (Locale::Ru, "port") => "Порт Prowlarr",
            (Locale::Ru, "api_key") => "API ключ",
            _ => "",
        }
    }
}
