//! Plain-text rendering of members and log entries.

use teamsync_core::{
  log::{LogEntry, Role},
  member::MemberRecord,
};

pub fn member_line(m: &MemberRecord) -> String {
  format!(
    "{:<8} {:<10} {:<8} {}{}",
    m.name,
    m.position,
    m.status.label(),
    m.last_updated.format("%H:%M"),
    if m.is_admin { "  [admin]" } else { "" },
  )
}

pub fn log_line(e: &LogEntry) -> String {
  let marker = match e.role {
    Role::System => "!",
    Role::User => " ",
  };
  format!("{:>4} {marker} {}", e.sequence, e.content)
}
