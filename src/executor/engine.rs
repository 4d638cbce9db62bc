//! Download execution
//!
//! One run fetches the selected streams into hidden part files next to the
//! final output, then joins them with ffmpeg. There is no retry and no
//! resume; a failed run records its error on the job and leaves no partial
//! files behind.

use crate::executor::fetch::fetch_stream;
use crate::executor::mux::StreamMuxer;
use crate::executor::progress::{TransferProgress, TransferStage};
use crate::extractor::MediaExtractor;
use crate::utils::error::ExecutionError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Everything the executor needs to run one job.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub job_id: String,
    pub url: String,
    pub audio_format_id: String,
    pub video_format_id: String,
    /// Media title, used for the output file name.
    pub title: String,
    /// Container extension of the chosen video (or combined) format.
    pub container_ext: String,
}

/// Seam between the job coordinator and the concrete executor.
#[async_trait]
pub trait JobRunner: Send + Sync {
    /// Run one job to completion, returning the final output path.
    async fn run(
        &self,
        request: ExecutionRequest,
        progress_tx: mpsc::Sender<TransferProgress>,
    ) -> Result<PathBuf, ExecutionError>;
}

/// Fetches streams over HTTP and joins them with ffmpeg.
pub struct DownloadExecutor {
    client: reqwest::Client,
    extractor: Arc<dyn MediaExtractor>,
    /// Absent when ffmpeg was not found; combined-format jobs still work.
    muxer: Option<StreamMuxer>,
    output_dir: PathBuf,
}

impl DownloadExecutor {
    pub fn new(
        client: reqwest::Client,
        extractor: Arc<dyn MediaExtractor>,
        muxer: Option<StreamMuxer>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            client,
            extractor,
            muxer,
            output_dir,
        }
    }

    fn part_path(&self, job_id: &str, stream: &str) -> PathBuf {
        self.output_dir.join(format!(".{}-{}.part", job_id, stream))
    }

    async fn run_inner(
        &self,
        request: &ExecutionRequest,
        combined: bool,
        video_part: &Path,
        audio_part: &Path,
        output_path: &Path,
        progress_tx: &mpsc::Sender<TransferProgress>,
    ) -> Result<PathBuf, ExecutionError> {
        let video_url = self
            .extractor
            .stream_url(&request.url, &request.video_format_id)
            .await
            .map_err(|e| ExecutionError::FetchFailed(format!("resolving video stream: {}", e)))?;

        fetch_stream(
            &self.client,
            &video_url,
            video_part,
            TransferStage::FetchingVideo,
            progress_tx,
        )
        .await
        .map_err(|e| ExecutionError::FetchFailed(e.to_string()))?;

        if combined {
            // One stream carries both tracks; move it into place as-is.
            tokio::fs::rename(video_part, output_path)
                .await
                .map_err(|e| ExecutionError::WriteFailed(format!("moving into place: {}", e)))?;
            return Ok(output_path.to_path_buf());
        }

        let audio_url = self
            .extractor
            .stream_url(&request.url, &request.audio_format_id)
            .await
            .map_err(|e| ExecutionError::FetchFailed(format!("resolving audio stream: {}", e)))?;

        fetch_stream(
            &self.client,
            &audio_url,
            audio_part,
            TransferStage::FetchingAudio,
            progress_tx,
        )
        .await
        .map_err(|e| ExecutionError::FetchFailed(e.to_string()))?;

        let muxer = self
            .muxer
            .as_ref()
            .ok_or_else(|| ExecutionError::MuxFailed("ffmpeg not available".to_string()))?;

        let _ = progress_tx
            .send(TransferProgress::starting(TransferStage::Muxing, None))
            .await;

        muxer
            .mux(video_part, audio_part, output_path)
            .await
            .map_err(|e| ExecutionError::MuxFailed(e.to_string()))?;

        Ok(output_path.to_path_buf())
    }
}

#[async_trait]
impl JobRunner for DownloadExecutor {
    async fn run(
        &self,
        request: ExecutionRequest,
        progress_tx: mpsc::Sender<TransferProgress>,
    ) -> Result<PathBuf, ExecutionError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                ExecutionError::WriteFailed(format!(
                    "creating {}: {}",
                    self.output_dir.display(),
                    e
                ))
            })?;

        let combined = request.audio_format_id == request.video_format_id;
        let output_path = self.output_dir.join(output_file_name(&request));
        let video_part = self.part_path(&request.job_id, "video");
        let audio_part = self.part_path(&request.job_id, "audio");

        let outcome = self
            .run_inner(
                &request,
                combined,
                &video_part,
                &audio_part,
                &output_path,
                &progress_tx,
            )
            .await;

        // Part files never outlive the run, success or not.
        cleanup_parts(&[&video_part, &audio_part]).await;

        match &outcome {
            Ok(path) => info!("job {} finished: {}", request.job_id, path.display()),
            Err(e) => warn!("job {} failed: {}", request.job_id, e),
        }

        outcome
    }
}

/// Output file name: the title stripped to alphanumerics and spaces, with
/// the container extension of the chosen video format.
fn output_file_name(request: &ExecutionRequest) -> String {
    let stem = sanitize_title(&request.title);
    let stem = if stem.is_empty() {
        format!("download-{}", request.job_id)
    } else {
        stem
    };
    format!("{}.{}", stem, request.container_ext)
}

fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

async fn cleanup_parts(parts: &[&Path]) {
    for part in parts {
        match tokio::fs::remove_file(part).await {
            Ok(()) => debug!("removed part file {}", part.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("failed to remove part file {}: {}", part.display(), e),
        }
    }
}
