//! Preview resolution

use crate::extractor::MediaExtractor;
use crate::resolver::models::PreviewResult;
use crate::resolver::rules::SourceRules;
use crate::resolver::split::split_formats;
use crate::resource::ResourceKey;
use crate::utils::error::ResolutionError;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns a source URL into the format lists a client can choose from.
pub struct Resolver {
    extractor: Arc<dyn MediaExtractor>,
    rules: SourceRules,
    accepted_extensions: Vec<String>,
}

impl Resolver {
    pub fn new(
        extractor: Arc<dyn MediaExtractor>,
        rules: SourceRules,
        accepted_extensions: Vec<String>,
    ) -> Self {
        Self {
            extractor,
            rules,
            accepted_extensions,
        }
    }

    /// Resolve a source URL into its selectable formats.
    ///
    /// The URL goes through the same rules as a job submission first; a
    /// disallowed source is reported as unsupported without ever reaching
    /// the extractor.
    pub async fn resolve(&self, url: &str) -> Result<PreviewResult, ResolutionError> {
        self.rules
            .check(url)
            .map_err(|e| ResolutionError::Unsupported(e.to_string()))?;

        let info = match self.extractor.probe(url).await {
            Ok(info) => info,
            Err(e) => {
                warn!("probe failed for {}: {:#}", url, e);
                return Err(ResolutionError::Unreachable(e.to_string()));
            }
        };

        let (audio, video) = split_formats(&info.formats, &self.accepted_extensions);
        if audio.is_empty() && video.is_empty() {
            warn!("probe of {} returned no usable formats", url);
            return Err(ResolutionError::NoFormats);
        }

        debug!(
            "resolved {}: {} audio / {} video formats",
            url,
            audio.len(),
            video.len()
        );

        Ok(PreviewResult {
            resource_key: ResourceKey::from_url(url),
            title: info.title,
            audio,
            video,
            resolved_at: Utc::now(),
        })
    }
}
