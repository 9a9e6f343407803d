//! Async HTTP client wrapping the TeamSync JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use teamsync_core::{log::LogEntry, member::MemberRecord};

/// Async HTTP client for the TeamSync REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

#[derive(Deserialize)]
struct AdvisoryResponse {
  text: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .timeout(timeout)
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self {
      client,
      base_url: base_url.into(),
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
  }

  /// Send `req` and decode the body, turning API errors into
  /// `"<kind>: <message>"`.
  async fn send<T: DeserializeOwned>(&self, what: &str, req: RequestBuilder) -> Result<T> {
    let resp = req.send().await.with_context(|| format!("{what} failed"))?;
    if !resp.status().is_success() {
      return Err(api_error(what, resp).await);
    }
    resp.json().await.with_context(|| format!("deserialising {what} response"))
  }

  // ── Registry ──────────────────────────────────────────────────────────────

  /// `GET /api/members`
  pub async fn list_members(&self) -> Result<Vec<MemberRecord>> {
    self
      .send("GET /members", self.client.get(self.url("/members")))
      .await
  }

  /// `POST /api/status`
  pub async fn set_status(&self, actor: &str, status: &str) -> Result<MemberRecord> {
    let body = json!({ "actor": actor, "status": status });
    self
      .send("POST /status", self.client.post(self.url("/status")).json(&body))
      .await
  }

  // ── Log ───────────────────────────────────────────────────────────────────

  /// `GET /api/log[?after=<seq>]`
  pub async fn read_log(&self, after: Option<u64>) -> Result<Vec<LogEntry>> {
    let mut req = self.client.get(self.url("/log"));
    if let Some(after) = after {
      req = req.query(&[("after", after)]);
    }
    self.send("GET /log", req).await
  }

  /// `POST /api/message`
  pub async fn post_message(&self, actor: &str, content: &str) -> Result<LogEntry> {
    let body = json!({ "actor": actor, "content": content });
    self
      .send("POST /message", self.client.post(self.url("/message")).json(&body))
      .await
  }

  /// `POST /api/photo`
  pub async fn share_photo(&self, actor: &str) -> Result<LogEntry> {
    let body = json!({ "actor": actor });
    self
      .send("POST /photo", self.client.post(self.url("/photo")).json(&body))
      .await
  }

  /// `POST /api/support`
  pub async fn request_support(&self, actor: &str, target: &str) -> Result<LogEntry> {
    let body = json!({ "actor": actor, "target": target });
    self
      .send("POST /support", self.client.post(self.url("/support")).json(&body))
      .await
  }

  // ── Advisory ──────────────────────────────────────────────────────────────

  /// `POST /api/advisory`
  pub async fn advisory(&self) -> Result<String> {
    let resp: AdvisoryResponse = self
      .send("POST /advisory", self.client.post(self.url("/advisory")))
      .await?;
    Ok(resp.text)
  }
}

async fn api_error(what: &str, resp: Response) -> anyhow::Error {
  let status = resp.status();
  match resp.json::<Value>().await {
    Ok(body) => match (body["error"].as_str(), body["message"].as_str()) {
      (Some(kind), Some(message)) => anyhow!("{what} → {status} {kind}: {message}"),
      _ => anyhow!("{what} → {status}"),
    },
    Err(_) => anyhow!("{what} → {status}"),
  }
}
