//! Error type for `teamsync-gemini`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no Gemini API key configured")]
  MissingApiKey,

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("Gemini returned {status}: {body}")]
  HttpStatus { status: u16, body: String },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("response contained no text")]
  EmptyResponse,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
