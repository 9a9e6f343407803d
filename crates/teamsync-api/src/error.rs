//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::{FromRequest, rejection::JsonRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use teamsync_core::Error as TeamError;
use thiserror::Error;

/// An error returned by an API handler.
///
/// The JSON body always carries a stable `error` kind so clients can tell an
/// unknown person from an unavailable advisory service.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Team(#[from] TeamError),

  #[error("bad request: {0}")]
  BadRequest(String),
}

impl ApiError {
  fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Team(e) => match e {
        TeamError::NotFound(_) | TeamError::UnknownActor(_) | TeamError::UnknownTarget(_) => {
          StatusCode::NOT_FOUND
        }
        TeamError::InvalidStatus(_) | TeamError::EmptyMessage => {
          StatusCode::UNPROCESSABLE_ENTITY
        }
        TeamError::AdminNotTargetable(_) => StatusCode::FORBIDDEN,
        TeamError::AdvisoryUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        TeamError::DuplicateMember(_) | TeamError::DuplicateId(_) | TeamError::EmptyName => {
          StatusCode::INTERNAL_SERVER_ERROR
        }
      },
    }
  }

  fn kind(&self) -> &'static str {
    match self {
      ApiError::BadRequest(_) => "bad_request",
      ApiError::Team(e) => e.kind(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::warn!(error = %self, "request failed");
    }
    let body = json!({ "error": self.kind(), "message": self.to_string() });
    (status, Json(body)).into_response()
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

/// [`Json`] whose rejections answer in the API's own error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
