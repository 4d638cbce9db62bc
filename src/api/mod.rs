//! HTTP endpoint layer
//!
//! A thin loopback surface over the preview cache and the job coordinator.
//! Handlers translate between wire shapes and domain calls; they hold no
//! state of their own.

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{DownloadAccepted, DownloadRequest, PreviewResponse};

use crate::jobs::JobCoordinator;
use crate::preview::PreviewCache;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub preview: Arc<PreviewCache>,
    pub coordinator: Arc<JobCoordinator>,
}

/// Build the service router.
///
/// CORS stays wide open: the expected caller is a browser extension popup,
/// which fetches from an extension origin.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/preview/:resource", get(routes::get_preview))
        .route("/download", post(routes::post_download))
        .route("/jobs/:id", get(routes::get_job))
        .route("/status", get(routes::get_status))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
