//! Service configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name probed in the working directory when no --config flag is given.
const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Top-level configuration, loaded from a TOML file.
///
/// Every section and every field is optional in the file; missing values fall
/// back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub download: DownloadConfig,
    pub tools: ToolsConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            download: DownloadConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:32567".to_string(),
        }
    }
}

/// `[download]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Directory finished files are written to.
    pub directory: PathBuf,

    /// Container extensions kept when building a preview. Formats with any
    /// other extension are dropped before classification.
    pub accepted_extensions: Vec<String>,

    /// Host patterns a source URL may use. A leading dot matches any
    /// subdomain ("`.youtube.com`" matches "`www.youtube.com`" but not the
    /// bare apex); a plain entry must match exactly.
    pub allowed_hosts: Vec<String>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: dirs::download_dir().unwrap_or_else(|| PathBuf::from("./downloads")),
            accepted_extensions: vec!["m4a".to_string(), "webm".to_string(), "mp4".to_string()],
            allowed_hosts: vec![".youtube.com".to_string(), "youtu.be".to_string()],
        }
    }
}

/// `[tools]` section. Explicit paths win over PATH discovery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ytdlp_path: Option<PathBuf>,
    pub ffmpeg_path: Option<PathBuf>,
}

impl ServiceConfig {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist and parse. Without one,
    /// `config.toml` in the working directory is used if present, otherwise
    /// defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}
