//! Member presence records.
//!
//! A member's identity (`id`, `name`, `position`, `is_admin`) is fixed when
//! the registry is seeded. Only `status` and `last_updated` ever change, and
//! they always change together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where a member currently is. Any status may follow any other.
///
/// Parses from either the wire name (`"in_meeting"`) or the display label
/// (`"회의 중"`).
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Status {
  #[default]
  #[strum(to_string = "in_office", serialize = "사무실")]
  InOffice,
  #[strum(to_string = "in_meeting", serialize = "회의 중")]
  InMeeting,
  #[strum(to_string = "out_of_office", serialize = "외근")]
  OutOfOffice,
  #[strum(to_string = "at_meal", serialize = "식사 중")]
  AtMeal,
  #[strum(to_string = "away", serialize = "부재중")]
  Away,
}

impl Status {
  /// The label shown to the team.
  pub fn label(self) -> &'static str {
    match self {
      Self::InOffice => "사무실",
      Self::InMeeting => "회의 중",
      Self::OutOfOffice => "외근",
      Self::AtMeal => "식사 중",
      Self::Away => "부재중",
    }
  }

  /// All statuses in display order.
  pub fn all() -> impl Iterator<Item = Status> { Self::iter() }

  /// Parse untrusted input, surrounding whitespace ignored.
  pub fn parse(input: &str) -> Result<Self> {
    input
      .trim()
      .parse()
      .map_err(|_| Error::InvalidStatus(input.to_owned()))
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// One team member's presence, as seen by readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
  pub id:           u32,
  pub name:         String,
  pub position:     String,
  pub status:       Status,
  pub is_admin:     bool,
  pub last_updated: DateTime<Utc>,
}

/// The seed shape for a member, supplied once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMember {
  /// Explicit id; assigned from seed order when absent.
  #[serde(default)]
  pub id:           Option<u32>,
  pub name:         String,
  #[serde(default)]
  pub position:     String,
  #[serde(default)]
  pub is_admin:     bool,
  #[serde(default)]
  pub status:       Status,
  /// Defaults to the moment the registry is built.
  #[serde(default)]
  pub last_updated: Option<DateTime<Utc>>,
}

impl NewMember {
  /// A non-admin member in the office, with everything else defaulted.
  pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
    Self {
      id:           None,
      name:         name.into(),
      position:     position.into(),
      is_admin:     false,
      status:       Status::default(),
      last_updated: None,
    }
  }

  pub fn admin(mut self) -> Self {
    self.is_admin = true;
    self
  }

  pub fn with_status(mut self, status: Status) -> Self {
    self.status = status;
    self
  }

  pub fn with_last_updated(mut self, at: DateTime<Utc>) -> Self {
    self.last_updated = Some(at);
    self
  }
}

/// The team every fresh deployment starts with.
pub fn default_team() -> Vec<NewMember> { default_team_at(Utc::now()) }

/// The default team with its morning check-ins stamped on `now`'s date.
/// Stamps later than `now` are pulled back to `now`.
pub fn default_team_at(now: DateTime<Utc>) -> Vec<NewMember> {
  let stamp = |h: u32, m: u32| {
    now
      .date_naive()
      .and_hms_opt(h, m, 0)
      .map(|t| t.and_utc())
      .filter(|t| *t <= now)
      .unwrap_or(now)
  };
  vec![
    NewMember::new("김철수", "팀장")
      .admin()
      .with_last_updated(stamp(9, 0)),
    NewMember::new("이영희", "디자이너")
      .with_status(Status::InMeeting)
      .with_last_updated(stamp(10, 30)),
    NewMember::new("박민수", "개발자")
      .with_status(Status::OutOfOffice)
      .with_last_updated(stamp(11, 0)),
  ]
}
