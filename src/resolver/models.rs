//! Preview data model

use crate::resource::ResourceKey;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// An audio-only stream the client may pick.
#[derive(Debug, Clone, Serialize)]
pub struct AudioFormat {
    pub format_id: String,
    pub ext: String,
    pub acodec: String,
    pub tbr: Option<f32>,
}

/// A video or combined stream the client may pick.
#[derive(Debug, Clone, Serialize)]
pub struct VideoFormat {
    pub format_id: String,
    pub ext: String,
    pub vcodec: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Outcome of one successful resolution.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewResult {
    pub resource_key: ResourceKey,
    pub title: String,
    pub audio: Vec<AudioFormat>,
    pub video: Vec<VideoFormat>,
    pub resolved_at: DateTime<Utc>,
}

impl PreviewResult {
    pub fn audio_format(&self, format_id: &str) -> Option<&AudioFormat> {
        self.audio.iter().find(|f| f.format_id == format_id)
    }

    pub fn video_format(&self, format_id: &str) -> Option<&VideoFormat> {
        self.video.iter().find(|f| f.format_id == format_id)
    }

    /// Container extension for a chosen format id, whichever list holds it.
    pub fn format_ext(&self, format_id: &str) -> Option<&str> {
        self.audio_format(format_id)
            .map(|f| f.ext.as_str())
            .or_else(|| self.video_format(format_id).map(|f| f.ext.as_str()))
    }
}
