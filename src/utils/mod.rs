//! Utility modules for error handling and configuration

pub mod config;
pub mod error;
pub mod tools;

// Re-export for convenience
pub use config::{DownloadConfig, ServerConfig, ServiceConfig, ToolsConfig};
pub use error::{ExecutionError, ResolutionError, ResourceKeyError, ValidationError};
