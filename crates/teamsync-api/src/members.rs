//! Handlers for the member registry and status transitions.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/members` | Seed order |
//! | `GET`  | `/members/:name` | 404 if not found |
//! | `GET`  | `/statuses` | The fixed status set with labels |
//! | `POST` | `/status` | Body: `{"actor":"...","status":"..."}` |

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use teamsync_core::{
  advisory::TextGenerator,
  dispatch,
  member::{MemberRecord, Status},
  store::TeamStore,
};

use crate::{
  ApiState,
  error::{ApiError, ApiJson},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /members`
pub async fn list<S, G>(State(state): State<ApiState<S, G>>) -> Json<Vec<MemberRecord>>
where
  S: TeamStore,
  G: TextGenerator,
{
  Json(state.store.list_members().await)
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /members/:name`
pub async fn get_one<S, G>(
  State(state): State<ApiState<S, G>>,
  Path(name): Path<String>,
) -> Result<Json<MemberRecord>, ApiError>
where
  S: TeamStore,
  G: TextGenerator,
{
  Ok(Json(state.store.find_by_name(&name).await?))
}

// ─── Statuses ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StatusOption {
  pub status: Status,
  pub label:  &'static str,
}

/// `GET /statuses`
pub async fn statuses() -> Json<Vec<StatusOption>> {
  Json(
    Status::all()
      .map(|status| StatusOption {
        status,
        label: status.label(),
      })
      .collect(),
  )
}

// ─── Transition ───────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /status`.
///
/// `status` is kept as text so out-of-range values reach the transition
/// service and are rejected there.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub actor:  String,
  pub status: String,
}

/// `POST /status` — returns the updated record.
pub async fn set_status<S, G>(
  State(state): State<ApiState<S, G>>,
  ApiJson(body): ApiJson<StatusBody>,
) -> Result<Json<MemberRecord>, ApiError>
where
  S: TeamStore,
  G: TextGenerator,
{
  let record =
    dispatch::set_status(state.store.as_ref(), &body.actor, &body.status, Utc::now()).await?;
  Ok(Json(record))
}
