//! Operations clients invoke against a [`TeamStore`].
//!
//! These are the only producers of log entries and the only callers of
//! [`TeamStore::set_status`]. Each operation is atomic on its own; none of
//! them spans more than one store mutation.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
  Error, Result,
  log::{LogEntry, Role},
  member::{MemberRecord, Status},
  store::TeamStore,
};

/// Change the acting member's status.
///
/// `status` is untrusted text and is re-validated against the fixed set of
/// statuses before anything is touched.
pub async fn set_status<S: TeamStore>(
  store: &S,
  actor: &str,
  status: &str,
  now: DateTime<Utc>,
) -> Result<MemberRecord> {
  let status = Status::parse(status)?;
  let record = store.set_status(actor, status, now).await?;
  info!(actor, status = %record.status, "status updated");
  Ok(record)
}

/// Ask `target` for help on behalf of `actor`.
///
/// The actor is not resolved: anyone, including the target themselves, may
/// raise a request. Admins cannot be targeted.
pub async fn request_support<S: TeamStore>(
  store: &S,
  actor: &str,
  target: &str,
) -> Result<LogEntry> {
  let target_record = store.find_by_name(target).await.map_err(|e| match e {
    Error::NotFound(name) => Error::UnknownTarget(name),
    other => other,
  })?;
  if target_record.is_admin {
    warn!(actor, target, "support request against admin rejected");
    return Err(Error::AdminNotTargetable(target_record.name));
  }

  let entry = store
    .append(Role::System, support_notice(actor, &target_record.name))
    .await;
  info!(actor, target, sequence = entry.sequence, "support requested");
  Ok(entry)
}

/// Post a chat message authored by `actor`.
pub async fn post_message<S: TeamStore>(
  store: &S,
  actor: &str,
  content: &str,
) -> Result<LogEntry> {
  let content = content.trim();
  if content.is_empty() {
    return Err(Error::EmptyMessage);
  }
  let actor = resolve_actor(store, actor).await?;
  let entry = store
    .append(Role::User, format!("[{}] {content}", actor.name))
    .await;
  info!(actor = %actor.name, sequence = entry.sequence, "message posted");
  Ok(entry)
}

/// Record that `actor` shared a photo. The image itself never reaches the
/// store; only the notice is logged.
pub async fn share_photo<S: TeamStore>(store: &S, actor: &str) -> Result<LogEntry> {
  let actor = resolve_actor(store, actor).await?;
  let entry = store
    .append(Role::User, format!("{}님이 사진을 공유했습니다.", actor.name))
    .await;
  info!(actor = %actor.name, sequence = entry.sequence, "photo shared");
  Ok(entry)
}

pub fn support_notice(actor: &str, target: &str) -> String {
  format!("{actor}님이 {target}님께 지원을 요청했습니다.")
}

async fn resolve_actor<S: TeamStore>(store: &S, actor: &str) -> Result<MemberRecord> {
  store.find_by_name(actor).await.map_err(|e| match e {
    Error::NotFound(name) => Error::UnknownActor(name),
    other => other,
  })
}
