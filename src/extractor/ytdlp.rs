//! yt-dlp wrapper for media probing
//!
//! Probes run `yt-dlp --dump-json` against the page URL; direct stream URLs
//! come from `yt-dlp -f <id> -g` at execution time, so probe output never
//! has to stay fresh for long.

use crate::extractor::models::MediaInfo;
use crate::extractor::traits::MediaExtractor;
use crate::utils::tools::find_binary;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, info};

/// Media extractor backed by the yt-dlp binary.
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
}

impl YtDlpExtractor {
    /// Locate yt-dlp and build the extractor.
    ///
    /// Fails when no usable binary is found; the service cannot resolve
    /// anything without one.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let ytdlp_path = find_binary("yt-dlp", explicit)
            .context("yt-dlp not found; install it or set tools.ytdlp_path in config.toml")?;
        info!("using yt-dlp at {}", ytdlp_path.display());
        Ok(Self { ytdlp_path })
    }

    /// Path of the binary in use.
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    /// Probe media metadata without downloading.
    /// Uses: yt-dlp --dump-json --no-download
    async fn probe(&self, url: &str) -> Result<MediaInfo> {
        debug!("probing media info for {}", url);

        let output = AsyncCommand::new(&self.ytdlp_path)
            .arg("--dump-json")
            .arg("--no-download")
            .arg("--no-warnings")
            .arg("--no-playlist")
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            bail!("yt-dlp probe failed: {}", error_msg.trim());
        }

        let json_str = String::from_utf8(output.stdout)?;
        let info: MediaInfo = serde_json::from_str(&json_str)?;

        Ok(info)
    }

    /// Resolve the direct stream URL for one format.
    /// Uses: yt-dlp -f <id> -g
    async fn stream_url(&self, url: &str, format_id: &str) -> Result<String> {
        debug!("resolving direct url for format {} of {}", format_id, url);

        let output = AsyncCommand::new(&self.ytdlp_path)
            .arg("-f")
            .arg(format_id)
            .arg("-g")
            .arg("--no-warnings")
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            bail!(
                "yt-dlp could not resolve format {}: {}",
                format_id,
                error_msg.trim()
            );
        }

        let direct = String::from_utf8(output.stdout)?.trim().to_string();
        if direct.is_empty() {
            bail!("yt-dlp returned no url for format {}", format_id);
        }

        Ok(direct)
    }
}
