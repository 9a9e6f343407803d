//! [`MemoryStore`] — the in-memory implementation of [`TeamStore`].

use std::{
  collections::{HashMap, HashSet},
  sync::Arc,
};

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

use teamsync_core::{
  Error, Result,
  event::TeamEvent,
  log::{LogEntry, Role},
  member::{MemberRecord, NewMember, Status},
  store::TeamStore,
};

/// How many unread events a subscriber may fall behind before it lags.
pub const EVENT_CAPACITY: usize = 256;

// ─── Slots ───────────────────────────────────────────────────────────────────

/// The mutable half of a member record. Always replaced as a pair.
#[derive(Debug, Clone, Copy)]
struct Presence {
  status:       Status,
  last_updated: DateTime<Utc>,
}

#[derive(Debug)]
struct MemberSlot {
  id:       u32,
  name:     String,
  position: String,
  is_admin: bool,
  presence: RwLock<Presence>,
}

impl MemberSlot {
  fn record(&self, presence: Presence) -> MemberRecord {
    MemberRecord {
      id:           self.id,
      name:         self.name.clone(),
      position:     self.position.clone(),
      status:       presence.status,
      is_admin:     self.is_admin,
      last_updated: presence.last_updated,
    }
  }

  async fn snapshot(&self) -> MemberRecord {
    let presence = *self.presence.read().await;
    self.record(presence)
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

struct Inner {
  /// Seed order; never grows or shrinks after construction.
  members: Vec<MemberSlot>,
  by_name: HashMap<String, usize>,
  log:     RwLock<Vec<LogEntry>>,
  events:  broadcast::Sender<TeamEvent>,
}

/// Shared team state held in memory.
///
/// Cloning is cheap — all clones share the same registry and log.
#[derive(Clone)]
pub struct MemoryStore {
  inner: Arc<Inner>,
}

impl MemoryStore {
  /// Build a registry from `seed`. The log starts empty.
  ///
  /// Members without an explicit id are numbered by seed position, starting
  /// at 1. Fails if a name is blank or repeated, or an id is repeated.
  pub fn new(seed: Vec<NewMember>) -> Result<Self> {
    let now = Utc::now();
    let mut members = Vec::with_capacity(seed.len());
    let mut by_name = HashMap::with_capacity(seed.len());
    let mut ids = HashSet::with_capacity(seed.len());

    for (index, m) in seed.into_iter().enumerate() {
      let name = m.name.trim().to_owned();
      if name.is_empty() {
        return Err(Error::EmptyName);
      }
      let id = m.id.unwrap_or(index as u32 + 1);
      if !ids.insert(id) {
        return Err(Error::DuplicateId(id));
      }
      if by_name.insert(name.clone(), index).is_some() {
        return Err(Error::DuplicateMember(name));
      }
      members.push(MemberSlot {
        id,
        name,
        position: m.position,
        is_admin: m.is_admin,
        presence: RwLock::new(Presence {
          status:       m.status,
          last_updated: m.last_updated.unwrap_or(now),
        }),
      });
    }

    let (events, _) = broadcast::channel(EVENT_CAPACITY);
    Ok(Self {
      inner: Arc::new(Inner {
        members,
        by_name,
        log: RwLock::new(Vec::new()),
        events,
      }),
    })
  }

  fn slot(&self, name: &str) -> Option<&MemberSlot> {
    self
      .inner
      .by_name
      .get(name.trim())
      .map(|&index| &self.inner.members[index])
  }

  fn publish(&self, event: TeamEvent) {
    // No subscribers is fine.
    let _ = self.inner.events.send(event);
  }
}

// ─── TeamStore impl ──────────────────────────────────────────────────────────

impl TeamStore for MemoryStore {
  // ── Registry ──────────────────────────────────────────────────────────────

  async fn find_by_name(&self, name: &str) -> Result<MemberRecord> {
    match self.slot(name) {
      Some(slot) => Ok(slot.snapshot().await),
      None => Err(Error::NotFound(name.to_owned())),
    }
  }

  async fn list_members(&self) -> Vec<MemberRecord> {
    let mut out = Vec::with_capacity(self.inner.members.len());
    for slot in &self.inner.members {
      out.push(slot.snapshot().await);
    }
    out
  }

  async fn set_status(
    &self,
    actor: &str,
    status: Status,
    now: DateTime<Utc>,
  ) -> Result<MemberRecord> {
    let slot = self
      .slot(actor)
      .ok_or_else(|| Error::UnknownActor(actor.to_owned()))?;

    let mut presence = slot.presence.write().await;
    // Callers read the clock before taking the lock, so a later writer may
    // carry an earlier `now`.
    *presence = Presence {
      status,
      last_updated: now.max(presence.last_updated),
    };
    let record = slot.record(*presence);
    // Publish under the lock so events for one member arrive in the order
    // the writes were applied.
    self.publish(TeamEvent::StatusChanged {
      member: record.clone(),
    });
    Ok(record)
  }

  // ── Log ───────────────────────────────────────────────────────────────────

  async fn append(&self, role: Role, content: String) -> LogEntry {
    let mut log = self.inner.log.write().await;
    let entry = LogEntry {
      sequence: log.len() as u64 + 1,
      role,
      content,
      recorded_at: Utc::now(),
    };
    log.push(entry.clone());
    self.publish(TeamEvent::Appended {
      entry: entry.clone(),
    });
    debug!(sequence = entry.sequence, "log entry appended");
    entry
  }

  async fn read_log(&self) -> Vec<LogEntry> { self.inner.log.read().await.clone() }

  async fn read_log_since(&self, after: u64) -> Vec<LogEntry> {
    let log = self.inner.log.read().await;
    // Sequence n lives at index n - 1.
    let start = usize::try_from(after).unwrap_or(usize::MAX).min(log.len());
    log[start..].to_vec()
  }

  // ── Notification ──────────────────────────────────────────────────────────

  fn subscribe(&self) -> broadcast::Receiver<TeamEvent> {
    self.inner.events.subscribe()
  }
}
