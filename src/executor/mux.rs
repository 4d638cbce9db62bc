//! Joining fetched streams with ffmpeg

use crate::utils::tools::find_binary;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, info};

/// Wrapper around the ffmpeg binary used to join audio and video streams.
pub struct StreamMuxer {
    ffmpeg_path: PathBuf,
}

impl StreamMuxer {
    /// Locate ffmpeg and build the muxer.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let ffmpeg_path = find_binary("ffmpeg", explicit)
            .context("ffmpeg not found; install it or set tools.ffmpeg_path in config.toml")?;
        info!("using ffmpeg at {}", ffmpeg_path.display());
        Ok(Self { ffmpeg_path })
    }

    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg_path
    }

    /// Join a video stream and an audio stream into `output` without
    /// re-encoding. An existing output file is overwritten.
    pub async fn mux(&self, video: &Path, audio: &Path, output: &Path) -> Result<()> {
        debug!(
            "muxing {} + {} -> {}",
            video.display(),
            audio.display(),
            output.display()
        );

        let result = AsyncCommand::new(&self.ffmpeg_path)
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-y")
            .arg("-i")
            .arg(video)
            .arg("-i")
            .arg(audio)
            .arg("-c")
            .arg("copy")
            .arg(output)
            .output()
            .await?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            bail!("ffmpeg exited with {}: {}", result.status, stderr.trim());
        }

        Ok(())
    }
}
