//! Opaque resource keys linking previews to download jobs

use crate::utils::error::ResourceKeyError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use std::fmt;

/// Identity of a media source, derived from its URL.
///
/// The wire form is standard base64 of the URL with `/` swapped for `_` so
/// the key survives as a single path segment. Clients are allowed to swap
/// only some of the slashes; [`ResourceKey::parse`] re-derives the canonical
/// form from the decoded URL so one URL always maps to one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Derive the canonical key for a source URL.
    pub fn from_url(url: &str) -> Self {
        Self(STANDARD.encode(url).replace('/', "_"))
    }

    /// Decode an incoming path segment into its canonical key and source URL.
    pub fn parse(encoded: &str) -> Result<(Self, String), ResourceKeyError> {
        let bytes = STANDARD.decode(encoded.replace('_', "/"))?;
        let url = String::from_utf8(bytes).map_err(|_| ResourceKeyError::NotUtf8)?;
        Ok((Self::from_url(&url), url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
