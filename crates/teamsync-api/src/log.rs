//! Handlers for the team log and the operations that append to it.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/log` | Optional `?after=<sequence>` |
//! | `POST` | `/message` | Body: `{"actor":"...","content":"..."}`; 201 |
//! | `POST` | `/photo` | Body: `{"actor":"..."}`; 201 |
//! | `POST` | `/support` | Body: `{"actor":"...","target":"..."}`; 201 |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use teamsync_core::{
  advisory::TextGenerator,
  dispatch,
  log::LogEntry,
  store::TeamStore,
};

use crate::{
  ApiState,
  error::{ApiError, ApiJson},
};

// ─── Read ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LogParams {
  /// Only return entries after this sequence number.
  pub after: Option<u64>,
}

/// `GET /log[?after=<sequence>]`
pub async fn list<S, G>(
  State(state): State<ApiState<S, G>>,
  Query(params): Query<LogParams>,
) -> Json<Vec<LogEntry>>
where
  S: TeamStore,
  G: TextGenerator,
{
  let entries = match params.after {
    Some(after) => state.store.read_log_since(after).await,
    None => state.store.read_log().await,
  };
  Json(entries)
}

// ─── Message ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MessageBody {
  pub actor:   String,
  pub content: String,
}

/// `POST /message` — returns 201 + the appended entry.
pub async fn post_message<S, G>(
  State(state): State<ApiState<S, G>>,
  ApiJson(body): ApiJson<MessageBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TeamStore,
  G: TextGenerator,
{
  let entry = dispatch::post_message(state.store.as_ref(), &body.actor, &body.content).await?;
  Ok((StatusCode::CREATED, Json(entry)))
}

// ─── Photo ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PhotoBody {
  pub actor: String,
}

/// `POST /photo` — logs the share notice; the image stays with the uploader.
pub async fn share_photo<S, G>(
  State(state): State<ApiState<S, G>>,
  ApiJson(body): ApiJson<PhotoBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TeamStore,
  G: TextGenerator,
{
  let entry = dispatch::share_photo(state.store.as_ref(), &body.actor).await?;
  Ok((StatusCode::CREATED, Json(entry)))
}

// ─── Support ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SupportBody {
  pub actor:  String,
  pub target: String,
}

/// `POST /support` — returns 201 + the system notice.
pub async fn request_support<S, G>(
  State(state): State<ApiState<S, G>>,
  ApiJson(body): ApiJson<SupportBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TeamStore,
  G: TextGenerator,
{
  let entry =
    dispatch::request_support(state.store.as_ref(), &body.actor, &body.target).await?;
  Ok((StatusCode::CREATED, Json(entry)))
}
