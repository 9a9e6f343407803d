//! TeamSync server assembly: configuration and the top-level router.

use std::{path::Path, sync::Arc};

use axum::Router;
use serde::Deserialize;
use teamsync_core::{
  advisory::TextGenerator,
  member::{NewMember, default_team},
  store::TeamStore,
};
use teamsync_gemini::GeminiConfig;
use tower_http::trace::TraceLayer;

/// Prefix for environment overrides, e.g. `TEAMSYNC_PORT=9000` or
/// `TEAMSYNC_GEMINI__API_KEY=...`.
pub const ENV_PREFIX: &str = "TEAMSYNC";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `teamsync.toml` and the
/// environment. Every field has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:    String,
  pub port:    u16,
  /// The team the registry is seeded with at startup.
  pub members: Vec<NewMember>,
  pub gemini:  GeminiConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:    "127.0.0.1".to_string(),
      port:    8080,
      members: default_team(),
      gemini:  GeminiConfig::default(),
    }
  }
}

/// Layer the optional file at `path` under `TEAMSYNC_*` environment variables.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(
      config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__"),
    )
    .build()?
    .try_deserialize()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full HTTP application: the JSON API under `/api`, with request
/// tracing.
pub fn app<S, G>(store: Arc<S>, advisor: Arc<G>) -> Router
where
  S: TeamStore + 'static,
  G: TextGenerator + 'static,
{
  Router::new()
    .nest("/api", teamsync_api::api_router(store, advisor))
    .layer(TraceLayer::new_for_http())
}
