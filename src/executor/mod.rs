//! Download execution module

pub mod engine;
pub mod fetch;
pub mod mux;
pub mod progress;

// Re-export for convenience
pub use engine::{DownloadExecutor, ExecutionRequest, JobRunner};
pub use mux::StreamMuxer;
pub use progress::{TransferProgress, TransferStage};
