//! Data structures for probed media information

use serde::{Deserialize, Serialize};

/// Probe result for a single media page.
///
/// Bound to `webpage_url`, not `url`: probe output may carry a top-level
/// direct `url` for the selected format, which is not the page address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    pub id: String,
    pub title: String,
    #[serde(rename = "webpage_url")]
    pub url: String,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub formats: Vec<RawFormat>,
}

/// One format entry as reported by the probe, before any filtering.
///
/// `acodec`/`vcodec` stay optional: entries that omit either field carry too
/// little information to classify and are dropped during resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFormat {
    pub format_id: String,
    pub ext: String,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub tbr: Option<f32>, // Total bitrate
}
