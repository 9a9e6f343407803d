//! [`GeminiClient`] — HTTP client for the `generateContent` endpoint.

use std::{fmt, time::Duration};

use serde::Deserialize;
use serde_json::json;
use teamsync_core::advisory::TextGenerator;
use tracing::debug;

use crate::{Error, Result};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Connection settings for the Gemini API.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
  pub api_base:           String,
  pub api_key:            String,
  pub model:              String,
  pub request_timeout_ms: u64,
}

impl Default for GeminiConfig {
  fn default() -> Self {
    Self {
      api_base:           "https://generativelanguage.googleapis.com/v1beta".to_string(),
      api_key:            String::new(),
      model:              "gemini-1.5-flash".to_string(),
      request_timeout_ms: 30_000,
    }
  }
}

impl fmt::Debug for GeminiConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("GeminiConfig")
      .field("api_base", &self.api_base)
      .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
      .field("model", &self.model)
      .field("request_timeout_ms", &self.request_timeout_ms)
      .finish()
  }
}

impl GeminiConfig {
  pub fn has_api_key(&self) -> bool { !self.api_key.trim().is_empty() }
}

// ─── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
  #[serde(default)]
  parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
  text: Option<String>,
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async client for Gemini text generation.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. A client
/// without an API key can be built; every call on it fails with
/// [`Error::MissingApiKey`].
#[derive(Debug, Clone)]
pub struct GeminiClient {
  client: reqwest::Client,
  config: GeminiConfig,
}

impl GeminiClient {
  pub fn new(config: GeminiConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
      .build()?;
    Ok(Self { client, config })
  }

  fn generate_content_url(&self) -> String {
    format!(
      "{}/models/{}:generateContent",
      self.config.api_base.trim_end_matches('/'),
      self.config.model
    )
  }

  /// Send `prompt` and return the first candidate's text.
  pub async fn generate_content(&self, prompt: &str) -> Result<String> {
    if !self.config.has_api_key() {
      return Err(Error::MissingApiKey);
    }

    let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
    let response = self
      .client
      .post(self.generate_content_url())
      .query(&[("key", self.config.api_key.as_str())])
      .json(&body)
      .send()
      .await?;

    let status = response.status();
    let raw = response.text().await?;
    if !status.is_success() {
      return Err(Error::HttpStatus {
        status: status.as_u16(),
        body:   raw,
      });
    }
    debug!(model = %self.config.model, bytes = raw.len(), "gemini replied");
    parse_generate_content_response(&raw)
  }
}

impl TextGenerator for GeminiClient {
  type Error = Error;

  async fn generate(&self, prompt: String) -> Result<String> {
    self.generate_content(&prompt).await
  }
}

/// Concatenate the text parts of the first candidate, unmodified.
fn parse_generate_content_response(raw: &str) -> Result<String> {
  let parsed: GenerateContentResponse = serde_json::from_str(raw)?;
  let parts = parsed
    .candidates
    .into_iter()
    .next()
    .and_then(|c| c.content)
    .map(|c| c.parts)
    .unwrap_or_default();

  let texts: Vec<String> = parts.into_iter().filter_map(|p| p.text).collect();
  if texts.is_empty() {
    return Err(Error::EmptyResponse);
  }
  Ok(texts.concat())
}
