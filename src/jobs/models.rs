//! Job data model

use crate::executor::TransferProgress;
use crate::resource::ResourceKey;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Lifecycle of a download job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    /// Terminal jobs never change again; only a non-terminal one blocks a
    /// new submission for the same resource.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// One download job and everything needed to report on it.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadJob {
    pub id: String,
    pub resource_key: ResourceKey,
    pub url: String,
    pub audio_format_id: String,
    pub video_format_id: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    /// Terminal error, as "kind: message". Only set on failed jobs.
    pub error: Option<String>,
    pub progress: Option<TransferProgress>,
    /// Final file location. Only set on completed jobs.
    pub output_path: Option<PathBuf>,
}

impl DownloadJob {
    pub fn new(
        resource_key: ResourceKey,
        url: &str,
        audio_format_id: &str,
        video_format_id: &str,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            resource_key,
            url: url.to_string(),
            audio_format_id: audio_format_id.to_string(),
            video_format_id: video_format_id.to_string(),
            status: JobStatus::Pending,
            created_at: Utc::now(),
            error: None,
            progress: None,
            output_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_is_pending() {
        let job = DownloadJob::new(
            ResourceKey::from_url("https://www.youtube.com/watch?v=abc"),
            "https://www.youtube.com/watch?v=abc",
            "140",
            "137",
        );
        assert_eq!(job.status, JobStatus::Pending);
        assert!(job.error.is_none());
        assert!(job.output_path.is_none());
        assert!(!job.status.is_terminal());
    }

    #[test]
    fn test_terminal_states() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&JobStatus::Running).unwrap(),
            "\"running\""
        );
    }
}
