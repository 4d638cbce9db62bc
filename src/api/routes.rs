//! HTTP handlers

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::jobs::{DownloadJob, JobStatus};
use crate::resolver::{AudioFormat, VideoFormat};
use crate::resource::ResourceKey;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Body of `POST /download`, matching what the extension popup sends.
#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub url: String,
    pub audio_id: String,
    pub video_id: String,
}

/// Body of the 202 response: the job to poll.
#[derive(Debug, Serialize)]
pub struct DownloadAccepted {
    pub job_id: String,
    pub status: JobStatus,
}

/// Body of `GET /preview/{resource}`: the two selectable format lists.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub audio: Vec<AudioFormat>,
    pub video: Vec<VideoFormat>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PreviewParams {
    /// Force re-resolution instead of serving the cached preview.
    #[serde(default)]
    pub refresh: bool,
}

/// `GET /preview/{resource}`
///
/// The path segment is the encoded resource key. A key that does not decode
/// is a 400; a resolver failure is a 502 with the failure kind.
pub async fn get_preview(
    State(state): State<AppState>,
    Path(encoded): Path<String>,
    Query(params): Query<PreviewParams>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let (key, url) = ResourceKey::parse(&encoded)?;

    let preview = if params.refresh {
        state.preview.refresh(&key, &url).await?
    } else {
        state.preview.get_or_resolve(&key, &url).await?
    };

    Ok(Json(PreviewResponse {
        audio: preview.audio.clone(),
        video: preview.video.clone(),
    }))
}

/// `POST /download`
///
/// Accepted submissions come back as 202 with the job id; resubmitting while
/// that job is still live returns the same id.
pub async fn post_download(
    State(state): State<AppState>,
    Json(request): Json<DownloadRequest>,
) -> Result<(StatusCode, Json<DownloadAccepted>), ApiError> {
    let handle = state
        .coordinator
        .submit(&request.url, &request.audio_id, &request.video_id)
        .await?;

    let status = handle.status().await.unwrap_or(JobStatus::Pending);

    Ok((
        StatusCode::ACCEPTED,
        Json(DownloadAccepted {
            job_id: handle.id().to_string(),
            status,
        }),
    ))
}

/// `GET /jobs/{id}`
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DownloadJob>, ApiError> {
    match state.coordinator.job(&id).await {
        Some(job) => Ok(Json(job)),
        None => Err(ApiError::not_found(format!("no job with id {}", id))),
    }
}

/// `GET /status`
pub async fn get_status() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
