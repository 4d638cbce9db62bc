//! Progress reporting for running jobs

use serde::Serialize;

/// Which phase of a job is currently moving bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStage {
    FetchingVideo,
    FetchingAudio,
    Muxing,
}

/// Point-in-time progress of one job, as exposed on its status record.
#[derive(Debug, Clone, Serialize)]
pub struct TransferProgress {
    pub stage: TransferStage,
    pub downloaded_bytes: u64,
    /// Content length of the current stream, when the server reports one.
    pub total_bytes: Option<u64>,
    /// Bytes per second since the current stage started.
    pub speed: f64,
}

impl TransferProgress {
    pub fn starting(stage: TransferStage, total_bytes: Option<u64>) -> Self {
        Self {
            stage,
            downloaded_bytes: 0,
            total_bytes,
            speed: 0.0,
        }
    }

    /// Percentage of the current stage, when its size is known.
    pub fn percentage(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) | None => None,
            Some(total) => Some((self.downloaded_bytes as f64 / total as f64) * 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_with_known_total() {
        let mut progress = TransferProgress::starting(TransferStage::FetchingVideo, Some(200));
        progress.downloaded_bytes = 50;
        assert_eq!(progress.percentage(), Some(25.0));
    }

    #[test]
    fn test_percentage_without_total() {
        let progress = TransferProgress::starting(TransferStage::FetchingAudio, None);
        assert_eq!(progress.percentage(), None);
    }

    #[test]
    fn test_percentage_with_zero_total() {
        let progress = TransferProgress::starting(TransferStage::FetchingVideo, Some(0));
        assert_eq!(progress.percentage(), None);
    }

    #[test]
    fn test_stage_serializes_snake_case() {
        let json = serde_json::to_string(&TransferStage::FetchingVideo).unwrap();
        assert_eq!(json, "\"fetching_video\"");
        let json = serde_json::to_string(&TransferStage::Muxing).unwrap();
        assert_eq!(json, "\"muxing\"");
    }
}
