//! HistoryLedger — append-only log of relationship snapshots.
//!
//! One snapshot is appended every time an event changes a subject's agent
//! set. Rows are never updated or deleted: historical correctness requires
//! an immutable trail. Exact duplicate appends are absorbed by storage and
//! resolve to the already-present row.

use epochal_core::errors::LedgerError;
use epochal_core::models::RelationshipSnapshot;
use epochal_core::EpochalResult;
use epochal_storage::queries::snapshot_ops;
use epochal_storage::Database;

use crate::convert;

/// Append a snapshot. Fails only on malformed input (empty subject).
/// Returns the snapshot id (existing id on a duplicate append).
pub fn append(
    db: &Database,
    subject: &str,
    agents: &[String],
    effective_at: u64,
    recorded_block: u64,
) -> EpochalResult<u64> {
    if subject.is_empty() {
        return Err(LedgerError::EmptySubject.into());
    }
    let agents_json = convert::encode_agents(agents)?;
    snapshot_ops::insert_snapshot(db.conn(), subject, &agents_json, effective_at, recorded_block)
}

/// A subject's most recent snapshots, newest first, at most `limit`.
pub fn history(
    db: &Database,
    subject: &str,
    limit: u32,
) -> EpochalResult<Vec<RelationshipSnapshot>> {
    let raw = snapshot_ops::recent_snapshots(db.conn(), subject, limit)?;
    raw.into_iter().map(convert::raw_to_snapshot).collect()
}
