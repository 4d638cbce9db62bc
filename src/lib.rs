//! Vidbridge library
//!
//! Local HTTP service that previews and downloads media for a companion
//! browser extension: resolve a page into selectable formats, then fetch and
//! mux the chosen streams into a local file.

pub mod api;
pub mod executor;
pub mod extractor;
pub mod jobs;
pub mod preview;
pub mod resolver;
pub mod resource;
pub mod utils;

// Re-export main types for easier use
pub use api::AppState;
pub use executor::{DownloadExecutor, JobRunner, StreamMuxer, TransferProgress, TransferStage};
pub use extractor::{MediaExtractor, MediaInfo, RawFormat, YtDlpExtractor};
pub use jobs::{DownloadJob, JobCoordinator, JobHandle, JobStatus};
pub use preview::PreviewCache;
pub use resolver::{AudioFormat, PreviewResult, Resolver, SourceRules, VideoFormat};
pub use resource::ResourceKey;
pub use utils::{ExecutionError, ResolutionError, ServiceConfig, ValidationError};
