use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photo_gallery::{
    config::Config,
    utils::{format_memory, network::reachable_urls},
    web::{AppState, WebServer},
};

#[derive(Parser)]
#[command(name = "photo-gallery")]
#[command(version)]
#[command(about = "Browse folders of photos with cached previews")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (falls back to CONFIG_FILE, then config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("photo_gallery={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Photo Gallery v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::load_from_file(path)?
        }
        None => Config::load()?,
    };

    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    let state = AppState::from_config(config);
    state.results.ensure_dir().await?;

    let server = WebServer::new(state.clone())?;

    for url in reachable_urls(server.addr()).await {
        info!("Listening on:         {}", url);
    }
    info!(
        "Cache memory ceiling: {} ({} per image cache)",
        format_memory(state.config.cache.memory_limit_bytes()),
        format_memory(state.config.cache.per_cache_budget() as u64)
    );
    info!("Listing batch size:   {}", state.config.gallery.batch_size);
    info!("Results folder:       {}", state.results.root().display());

    server.serve().await?;
    state.gallery.shutdown();
    Ok(())
}
