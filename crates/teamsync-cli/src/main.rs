//! `teamsync` — command-line client for the TeamSync server.
//!
//! # Usage
//!
//! ```
//! teamsync --url http://localhost:8080 members
//! teamsync --as 이영희 status 외근
//! teamsync --as 김철수 support 박민수
//! teamsync --config ~/.config/teamsync/config.toml log --after 10
//! ```

mod client;
mod render;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use client::ApiClient;
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "teamsync", about = "Command-line client for TeamSync")]
struct Args {
  /// Path to a TOML config file (url, actor).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the server (default: http://localhost:8080).
  #[arg(long, env = "TEAMSYNC_URL")]
  url: Option<String>,

  /// Member name to act as.
  #[arg(long = "as", env = "TEAMSYNC_ACTOR", value_name = "NAME")]
  actor: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show every member's presence.
  Members,
  /// Set your own status (wire name or label).
  Status { status: String },
  /// Ask a non-admin member for help.
  Support { target: String },
  /// Post a chat message.
  Say {
    #[arg(required = true, num_args = 1..)]
    words: Vec<String>,
  },
  /// Announce that you shared a photo.
  Photo,
  /// Print the team log.
  Log {
    /// Only entries after this sequence number.
    #[arg(long)]
    after: Option<u64>,
  },
  /// Ask the server for an AI team briefing.
  Advisory,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:   String,
  #[serde(default)]
  actor: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| "http://localhost:8080".to_string());
  let actor = args
    .actor
    .or_else(|| (!file_cfg.actor.is_empty()).then(|| file_cfg.actor.clone()));

  let client = ApiClient::new(base_url, Duration::from_secs(60))?;
  let require_actor = || actor.clone().ok_or_else(|| anyhow!("this command needs --as <NAME>"));

  match args.command {
    Command::Members => {
      for m in client.list_members().await? {
        println!("{}", render::member_line(&m));
      }
    }
    Command::Status { status } => {
      let m = client.set_status(&require_actor()?, &status).await?;
      println!("{}", render::member_line(&m));
    }
    Command::Support { target } => {
      let e = client.request_support(&require_actor()?, &target).await?;
      println!("{}", render::log_line(&e));
    }
    Command::Say { words } => {
      let e = client.post_message(&require_actor()?, &words.join(" ")).await?;
      println!("{}", render::log_line(&e));
    }
    Command::Photo => {
      let e = client.share_photo(&require_actor()?).await?;
      println!("{}", render::log_line(&e));
    }
    Command::Log { after } => {
      for e in client.read_log(after).await? {
        println!("{}", render::log_line(&e));
      }
    }
    Command::Advisory => println!("{}", client.advisory().await?),
  }

  Ok(())
}
