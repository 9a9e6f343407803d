//! The append-only team log: chat messages and system notices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  /// Machine-generated notices, e.g. support requests.
  System,
  /// Text authored by an acting member.
  User,
}

/// One entry in the log. Entries are never mutated or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
  /// Position in arrival order, starting at 1, without gaps.
  pub sequence:    u64,
  pub role:        Role,
  pub content:     String,
  /// Wall-clock time of the append. Informational only; ordering is by
  /// `sequence`.
  pub recorded_at: DateTime<Utc>,
}
