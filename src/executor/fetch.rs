//! Streaming fetch of one media stream to disk

use crate::executor::progress::{TransferProgress, TransferStage};
use anyhow::Result;
use futures::StreamExt;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::debug;

/// Stream a direct media URL into `output_path`.
///
/// Progress is reported roughly once a second and is advisory only; a gone
/// receiver never stops the transfer. Returns the number of bytes written.
pub async fn fetch_stream(
    client: &reqwest::Client,
    url: &str,
    output_path: &Path,
    stage: TransferStage,
    progress_tx: &mpsc::Sender<TransferProgress>,
) -> Result<u64> {
    debug!("fetching {:?} stream to {}", stage, output_path.display());

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(anyhow::anyhow!("HTTP error: {}", response.status()));
    }

    let total_bytes = response.content_length();
    let mut progress = TransferProgress::starting(stage, total_bytes);
    let _ = progress_tx.send(progress.clone()).await;

    let mut file = File::create(output_path).await?;
    let mut downloaded = 0u64;

    let start_time = Instant::now();
    let mut last_update = start_time;

    let mut stream = response.bytes_stream();
    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        let now = Instant::now();
        if now.duration_since(last_update) >= Duration::from_secs(1) {
            let elapsed = now.duration_since(start_time).as_secs_f64();
            progress.downloaded_bytes = downloaded;
            progress.speed = if elapsed > 0.0 {
                downloaded as f64 / elapsed
            } else {
                0.0
            };
            let _ = progress_tx.send(progress.clone()).await;
            last_update = now;
        }
    }

    file.flush().await?;

    let elapsed = start_time.elapsed().as_secs_f64();
    progress.downloaded_bytes = downloaded;
    progress.speed = if elapsed > 0.0 {
        downloaded as f64 / elapsed
    } else {
        0.0
    };
    let _ = progress_tx.send(progress).await;

    Ok(downloaded)
}
