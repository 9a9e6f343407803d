//! Volatile in-process backend for the TeamSync store.
//!
//! State lives only as long as the process. Each member's presence sits
//! behind its own lock; the log has a single lock that also guards sequence
//! allocation.

mod store;

pub use store::{EVENT_CAPACITY, MemoryStore};
