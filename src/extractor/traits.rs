use crate::extractor::models::MediaInfo;
use anyhow::Result;
use async_trait::async_trait;

/// Core trait for media probing and stream resolution.
///
/// This isolates the resolver and executor from the specific extraction
/// backend, and lets tests run the whole pipeline against a canned probe.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g. "yt-dlp")
    fn id(&self) -> &'static str;

    /// Probes a media page for its metadata and raw format list.
    async fn probe(&self, url: &str) -> Result<MediaInfo>;

    /// Resolves the direct stream URL for a specific format.
    async fn stream_url(&self, url: &str, format_id: &str) -> Result<String>;
}
