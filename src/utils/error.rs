//! Error types for the preview and download pipeline

use thiserror::Error;

/// Rejections raised before any work is dispatched.
///
/// These are surfaced synchronously to the caller as 4xx responses with a
/// machine-readable kind, never stored on a job.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("url must not be empty")]
    EmptyUrl,

    #[error("unsupported source host: {0}")]
    UnsupportedHost(String),

    #[error("source url does not point at a media page")]
    BareRootPath,

    #[error("format id '{0}' is not part of the current preview")]
    UnknownFormat(String),
}

impl ValidationError {
    /// Stable machine-readable kind for API payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::EmptyUrl => "empty_url",
            ValidationError::UnsupportedHost(_) => "unsupported_host",
            ValidationError::BareRootPath => "bare_root_path",
            ValidationError::UnknownFormat(_) => "unknown_format",
        }
    }
}

/// Failures while probing a source for its available streams.
///
/// Clone is required: a single resolution may be shared by several waiting
/// preview requests, each of which gets its own copy of the outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("source not supported: {0}")]
    Unsupported(String),

    #[error("media probe failed: {0}")]
    Unreachable(String),

    #[error("no usable formats for this source")]
    NoFormats,
}

impl ResolutionError {
    pub fn kind(&self) -> &'static str {
        match self {
            ResolutionError::Unsupported(_) => "unsupported_source",
            ResolutionError::Unreachable(_) => "extractor_unreachable",
            ResolutionError::NoFormats => "no_formats",
        }
    }
}

/// Failures inside a running download job.
///
/// These never bubble out of the executor task; they are recorded on the
/// owning job as its terminal error.
#[derive(Debug, Clone, Error)]
pub enum ExecutionError {
    #[error("stream fetch failed: {0}")]
    FetchFailed(String),

    #[error("merging streams failed: {0}")]
    MuxFailed(String),

    #[error("writing output failed: {0}")]
    WriteFailed(String),
}

impl ExecutionError {
    pub fn kind(&self) -> &'static str {
        match self {
            ExecutionError::FetchFailed(_) => "fetch_failed",
            ExecutionError::MuxFailed(_) => "mux_failed",
            ExecutionError::WriteFailed(_) => "write_failed",
        }
    }
}

/// Rejections while decoding an incoming resource key path segment.
#[derive(Debug, Error)]
pub enum ResourceKeyError {
    #[error("resource key is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("resource key does not decode to a UTF-8 URL")]
    NotUtf8,
}
