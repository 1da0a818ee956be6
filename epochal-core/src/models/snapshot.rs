//! Relationship snapshots: the atomic unit of the history ledger.

use serde::{Deserialize, Serialize};

/// One immutable recorded relationship value, effective from a given
/// timestamp. Appended every time an event changes a subject's agent set;
/// never updated or deleted afterwards.
///
/// For a given subject, `effective_at` is non-decreasing in append order
/// (the feed is causally ordered). Ties on `effective_at` are broken by
/// `recorded_block`, then by `snapshot_id` (insertion order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipSnapshot {
    /// Assigned by storage on append. Monotonically increasing.
    pub snapshot_id: u64,
    /// The entity whose relationship this records.
    pub subject: String,
    /// The agent set in effect from `effective_at` onwards.
    pub agents: Vec<String>,
    /// Block timestamp of the event that produced this snapshot (unix seconds).
    pub effective_at: u64,
    /// Block height of the producing event. Later blocks win ties.
    pub recorded_block: u64,
}
