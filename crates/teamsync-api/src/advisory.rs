//! Handler for `POST /advisory`.

use axum::{Json, extract::State};
use serde::Serialize;
use teamsync_core::{
  advisory::{self, TextGenerator},
  store::TeamStore,
};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct AdvisoryResponse {
  pub text: String,
}

/// `POST /advisory` — the generator's reply, verbatim.
///
/// Returns 503 with `"error":"advisory_unavailable"` when the generator
/// fails. If the client goes away the call is simply dropped; nothing is
/// written either way.
pub async fn handler<S, G>(
  State(state): State<ApiState<S, G>>,
) -> Result<Json<AdvisoryResponse>, ApiError>
where
  S: TeamStore,
  G: TextGenerator,
{
  let text = advisory::brief_team(state.store.as_ref(), state.advisor.as_ref()).await?;
  Ok(Json(AdvisoryResponse { text }))
}
