//! API error responses

use crate::utils::error::{ResolutionError, ResourceKeyError, ValidationError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Wire form of an error.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable kind
    pub code: String,
    /// Human-readable message
    pub message: String,
}

/// Error type handlers return; renders as a JSON envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }
}

/// Validation rejections are the caller's fault.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err.kind(), err.to_string())
    }
}

/// Resolution failures mean the extraction backend let us down.
impl From<ResolutionError> for ApiError {
    fn from(err: ResolutionError) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, err.kind(), err.to_string())
    }
}

impl From<ResourceKeyError> for ApiError {
    fn from(err: ResourceKeyError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_resource_key", err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400_with_kind() {
        let api: ApiError = ValidationError::EmptyUrl.into();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.code, "empty_url");

        let api: ApiError = ValidationError::UnknownFormat("999".to_string()).into();
        assert_eq!(api.code, "unknown_format");
        assert!(api.message.contains("999"));
    }

    #[test]
    fn test_resolution_maps_to_502_with_kind() {
        let api: ApiError = ResolutionError::NoFormats.into();
        assert_eq!(api.status, StatusCode::BAD_GATEWAY);
        assert_eq!(api.code, "no_formats");

        let api: ApiError = ResolutionError::Unreachable("probe died".to_string()).into();
        assert_eq!(api.status, StatusCode::BAD_GATEWAY);
        assert_eq!(api.code, "extractor_unreachable");
    }
}
