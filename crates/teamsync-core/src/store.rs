//! The `TeamStore` trait: the member registry and the team log.
//!
//! The trait is implemented by storage backends (e.g.
//! `teamsync-store-memory`). Higher layers (`teamsync-api`, the operations in
//! [`crate::dispatch`]) depend on this abstraction, not on a concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use crate::{
  Result,
  event::TeamEvent,
  log::{LogEntry, Role},
  member::{MemberRecord, Status},
};

/// Abstraction over the shared team state.
///
/// Implementations must be safe under concurrent use from many clients:
///
/// - a member's `status` and `last_updated` change together, and readers
///   never observe one without the other;
/// - transitions of different members do not block each other;
/// - log appends receive strictly increasing, gap-free sequence numbers in
///   the order they became visible.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait TeamStore: Send + Sync {
  // ── Registry ──────────────────────────────────────────────────────────

  /// Look a member up by display name. Fails with `NotFound`.
  fn find_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<MemberRecord>> + Send + 'a;

  /// All members in seed order.
  fn list_members(&self) -> impl Future<Output = Vec<MemberRecord>> + Send + '_;

  /// Whether `name` is an admin. Fails with `NotFound`.
  fn is_admin<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<bool>> + Send + 'a {
    async move { Ok(self.find_by_name(name).await?.is_admin) }
  }

  /// Set `status` and `last_updated = now` on the member named `actor`.
  ///
  /// `last_updated` never moves backwards: a `now` earlier than the stored
  /// value keeps the stored value. Fails only with `UnknownActor`. No other
  /// member is touched.
  fn set_status<'a>(
    &'a self,
    actor: &'a str,
    status: Status,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<MemberRecord>> + Send + 'a;

  // ── Log ───────────────────────────────────────────────────────────────

  /// Append an entry and return it with its assigned sequence number.
  fn append(
    &self,
    role: Role,
    content: String,
  ) -> impl Future<Output = LogEntry> + Send + '_;

  /// The whole log in sequence order.
  fn read_log(&self) -> impl Future<Output = Vec<LogEntry>> + Send + '_;

  /// Entries with `sequence > after`, in sequence order.
  fn read_log_since(
    &self,
    after: u64,
  ) -> impl Future<Output = Vec<LogEntry>> + Send + '_;

  // ── Notification ──────────────────────────────────────────────────────

  /// Receive every [`TeamEvent`] published from now on.
  fn subscribe(&self) -> broadcast::Receiver<TeamEvent>;
}
