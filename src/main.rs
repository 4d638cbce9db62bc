//! Vidbridge - local media preview and download service
//!
//! Sits on loopback next to a browser extension: the extension asks for a
//! preview of the current tab, the user picks an audio and a video format,
//! and a download job fetches and muxes the streams into the local
//! downloads directory.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vidbridge::api::{self, AppState};
use vidbridge::executor::{DownloadExecutor, StreamMuxer};
use vidbridge::extractor::{MediaExtractor, YtDlpExtractor};
use vidbridge::jobs::JobCoordinator;
use vidbridge::preview::PreviewCache;
use vidbridge::resolver::{Resolver, SourceRules};
use vidbridge::utils::ServiceConfig;

#[derive(Parser)]
#[command(name = "vidbridge", about = "Local media preview and download service")]
struct Args {
    /// Path to a config file (defaults to ./config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen address from the config
    #[arg(long)]
    bind: Option<String>,

    /// Override the download directory from the config
    #[arg(long)]
    download_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vidbridge=debug"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut config = ServiceConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    if let Some(dir) = args.download_dir {
        config.download.directory = dir;
    }

    // No yt-dlp, no service; a missing ffmpeg only blocks jobs that need a
    // mux step, so start anyway and say so.
    let extractor: Arc<dyn MediaExtractor> =
        Arc::new(YtDlpExtractor::discover(config.tools.ytdlp_path.as_deref())?);
    let muxer = match StreamMuxer::discover(config.tools.ffmpeg_path.as_deref()) {
        Ok(muxer) => Some(muxer),
        Err(e) => {
            warn!("{:#}; downloads that need stream merging will fail", e);
            None
        }
    };

    let rules = SourceRules::new(config.download.allowed_hosts.clone());
    let resolver = Arc::new(Resolver::new(
        extractor.clone(),
        rules.clone(),
        config.download.accepted_extensions.clone(),
    ));
    let preview = Arc::new(PreviewCache::new(resolver));
    let executor = Arc::new(DownloadExecutor::new(
        reqwest::Client::new(),
        extractor,
        muxer,
        config.download.directory.clone(),
    ));
    let coordinator = Arc::new(JobCoordinator::new(preview.clone(), executor, rules));

    let app = api::router(AppState {
        preview,
        coordinator,
    });

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.server.bind_addr))?;
    info!("listening on http://{}", listener.local_addr()?);
    info!("downloads go to {}", config.download.directory.display());

    axum::serve(listener, app).await?;

    Ok(())
}
