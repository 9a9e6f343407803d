//! Change notifications published by a [`TeamStore`](crate::store::TeamStore).

use serde::{Deserialize, Serialize};

use crate::{log::LogEntry, member::MemberRecord};

/// Published after a mutation has become visible to readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TeamEvent {
  StatusChanged { member: MemberRecord },
  Appended { entry: LogEntry },
}
