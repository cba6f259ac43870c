//! Conversion of raw Prowlarr releases into host catalog records.

use chrono::{DateTime, Datelike, Utc};

use crate::locale::Locale;

use super::{MediaType, ProwlarrRelease, ReleaseRecord, SOURCE_ID};

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const DEFAULT_QUALITY: &str = "HD";
const UNKNOWN_TRACKER: &str = "Unknown";
const NO_SIZE: &str = "N/A";

/// Presentation defaults applied during normalization.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub locale: Locale,
    pub placeholder_poster_url: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            placeholder_poster_url: "https://via.placeholder.com/300x450?text=No+Poster"
                .to_string(),
        }
    }
}

/// Normalize every release, preserving upstream order.
pub fn normalize_releases(
    releases: Vec<ProwlarrRelease>,
    media_type: MediaType,
    options: &NormalizeOptions,
) -> Vec<ReleaseRecord> {
    releases
        .into_iter()
        .map(|r| normalize_release(r, media_type, options))
        .collect()
}

/// Normalize a single upstream release.
pub fn normalize_release(
    release: ProwlarrRelease,
    media_type: MediaType,
    options: &NormalizeOptions,
) -> ReleaseRecord {
    let year = release
        .year
        .filter(|y| *y != 0)
        .or_else(|| {
            release
                .publish_date
                .as_deref()
                .and_then(parse_publish_date)
                .map(|d| d.year())
        });

    let poster_url = release
        .images
        .iter()
        .flatten()
        .find(|img| img.cover_type.as_deref() == Some("poster"))
        .and_then(|img| img.url.clone())
        .unwrap_or_else(|| options.placeholder_poster_url.clone());

    let quality = release
        .quality
        .as_ref()
        .and_then(quality_label)
        .unwrap_or_else(|| DEFAULT_QUALITY.to_string());

    ReleaseRecord {
        id: release
            .guid
            .filter(|g| !g.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        title: release
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| options.locale.untitled().to_string()),
        year,
        poster_url,
        description: release.description.unwrap_or_default(),
        seeders: clamp_count(release.seeders),
        leechers: clamp_count(release.leechers),
        size_formatted: format_size(release.size),
        quality,
        source: SOURCE_ID.to_string(),
        magnet_uri: release.magnet_url.unwrap_or_default(),
        tracker_name: release
            .indexer
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| UNKNOWN_TRACKER.to_string()),
        media_type,
        rating: release.rating,
    }
}

/// Human-readable size with binary units.
///
/// Absent, zero or negative sizes render as `"N/A"`. Values are rounded to two
/// decimals with trailing zeros dropped (`1536` -> `"1.5 KB"`).
pub fn format_size(bytes: Option<i64>) -> String {
    let bytes = match bytes {
        Some(b) if b > 0 => b,
        _ => return NO_SIZE.to_string(),
    };

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// Parse Prowlarr's publish date.
fn parse_publish_date(date_str: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(date_str)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|ndt| ndt.and_utc())
        })
}

fn quality_label(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Object(map) => map
            .get("name")
            .and_then(|n| n.as_str())
            .or_else(|| {
                map.get("quality")
                    .and_then(|q| q.get("name"))
                    .and_then(|n| n.as_str())
            })
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

fn clamp_count(count: Option<i64>) -> u32 {
    count.unwrap_or(0).clamp(0, u32::MAX as i64) as u32
}
