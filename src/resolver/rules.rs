//! Source URL validation rules

use crate::utils::error::ValidationError;
use url::Url;

/// Which source URLs may be previewed and downloaded.
///
/// The same checks run for preview resolution and job submission so the two
/// surfaces cannot drift apart.
#[derive(Debug, Clone)]
pub struct SourceRules {
    host_patterns: Vec<String>,
}

impl SourceRules {
    pub fn new(host_patterns: Vec<String>) -> Self {
        Self { host_patterns }
    }

    /// Validate a submitted source URL and hand back its parsed form.
    pub fn check(&self, raw: &str) -> Result<Url, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }

        let url = Url::parse(trimmed)
            .map_err(|_| ValidationError::UnsupportedHost(trimmed.to_string()))?;
        let host = match url.host_str() {
            Some(host) => host,
            None => return Err(ValidationError::UnsupportedHost(trimmed.to_string())),
        };

        if !self.host_allowed(host) {
            return Err(ValidationError::UnsupportedHost(host.to_string()));
        }

        // A bare origin carries no media reference, query string or not.
        if url.path() == "/" {
            return Err(ValidationError::BareRootPath);
        }

        Ok(url)
    }

    /// A pattern with a leading dot matches any subdomain but never the apex;
    /// a plain pattern must match the host exactly.
    fn host_allowed(&self, host: &str) -> bool {
        self.host_patterns.iter().any(|pattern| {
            if pattern.starts_with('.') {
                host.ends_with(pattern.as_str())
            } else {
                host == pattern
            }
        })
    }
}
