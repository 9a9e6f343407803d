//! Error types for `teamsync-core`.

use strum::IntoStaticStr;
use thiserror::Error;

/// Every failure the registry, the log and the advisory boundary can report.
///
/// All variants are recoverable; an operation that returns one of them has
/// left shared state untouched.
#[derive(Debug, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Error {
  #[error("member not found: {0}")]
  NotFound(String),

  #[error("unknown actor: {0}")]
  UnknownActor(String),

  #[error("unknown support target: {0}")]
  UnknownTarget(String),

  #[error("invalid status: {0:?}")]
  InvalidStatus(String),

  #[error("{0} is an admin and cannot be asked for support")]
  AdminNotTargetable(String),

  #[error("message is empty")]
  EmptyMessage,

  #[error("duplicate member name: {0}")]
  DuplicateMember(String),

  #[error("duplicate member id: {0}")]
  DuplicateId(u32),

  #[error("member name must not be blank")]
  EmptyName,

  #[error("advisory unavailable: {0}")]
  AdvisoryUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Stable snake_case name of the variant, e.g. `"admin_not_targetable"`.
  pub fn kind(&self) -> &'static str { self.into() }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
