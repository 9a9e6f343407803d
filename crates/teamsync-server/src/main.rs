//! teamsync-server binary.
//!
//! Reads `teamsync.toml` (or the path given with `--config`), seeds the
//! in-memory team registry, and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use teamsync_gemini::GeminiClient;
use teamsync_store_memory::MemoryStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "TeamSync presence server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "teamsync.toml")]
  config: PathBuf,

  /// Override the bind host.
  #[arg(long)]
  host: Option<String>,

  /// Override the bind port.
  #[arg(long)]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut cfg = teamsync_server::load_config(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  if let Some(host) = cli.host {
    cfg.host = host;
  }
  if let Some(port) = cli.port {
    cfg.port = port;
  }

  let members = cfg.members.len();
  let store = MemoryStore::new(cfg.members).context("invalid member seed")?;

  if !cfg.gemini.has_api_key() {
    tracing::warn!("no Gemini API key configured; advisory requests will fail");
  }
  let advisor = GeminiClient::new(cfg.gemini).context("failed to build Gemini client")?;

  let app = teamsync_server::app(Arc::new(store), Arc::new(advisor));
  let address = format!("{}:{}", cfg.host, cfg.port);

  tracing::info!(members, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      let _ = tokio::signal::ctrl_c().await;
      tracing::info!("shutting down");
    })
    .await
    .context("server error")?;

  Ok(())
}
