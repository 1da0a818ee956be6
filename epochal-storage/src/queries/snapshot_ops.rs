//! Raw SQL operations for the relationship_snapshots table.
//!
//! The table is append-only: insert and read, no update, no delete.

use rusqlite::{params, Connection};

use epochal_core::EpochalResult;

use crate::to_storage_err;

/// Raw snapshot row. `agents` is the JSON-encoded agent set.
#[derive(Debug, Clone)]
pub struct RawSnapshot {
    pub snapshot_id: u64,
    pub subject: String,
    pub agents: String,
    pub effective_at: u64,
    pub recorded_block: u64,
}

/// Insert a snapshot. Idempotent against exact duplicates via the UNIQUE
/// constraint: re-inserting an identical row returns the existing id.
pub fn insert_snapshot(
    conn: &Connection,
    subject: &str,
    agents: &str,
    effective_at: u64,
    recorded_block: u64,
) -> EpochalResult<u64> {
    let changed = conn
        .execute(
            "INSERT OR IGNORE INTO relationship_snapshots
                (subject, agents, effective_at, recorded_block)
             VALUES (?1, ?2, ?3, ?4)",
            params![subject, agents, effective_at as i64, recorded_block as i64],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if changed > 0 {
        return Ok(conn.last_insert_rowid() as u64);
    }

    // Duplicate append: hand back the id of the already-present row.
    conn.query_row(
        "SELECT snapshot_id FROM relationship_snapshots
         WHERE subject = ?1 AND agents = ?2 AND effective_at = ?3 AND recorded_block = ?4",
        params![subject, agents, effective_at as i64, recorded_block as i64],
        |row| row.get::<_, i64>(0),
    )
    .map(|id| id as u64)
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Get a subject's most recent snapshots in descending
/// (effective_at, recorded_block, snapshot_id) order, at most `limit` rows.
/// This is the resolver's bounded backward traversal, index-backed.
pub fn recent_snapshots(
    conn: &Connection,
    subject: &str,
    limit: u32,
) -> EpochalResult<Vec<RawSnapshot>> {
    let mut stmt = conn
        .prepare(
            "SELECT snapshot_id, subject, agents, effective_at, recorded_block
             FROM relationship_snapshots
             WHERE subject = ?1
             ORDER BY effective_at DESC, recorded_block DESC, snapshot_id DESC
             LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![subject, limit], row_to_raw_snapshot)
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Snapshot count for a subject.
pub fn count_for_subject(conn: &Connection, subject: &str) -> EpochalResult<u64> {
    conn.query_row(
        "SELECT COUNT(*) FROM relationship_snapshots WHERE subject = ?1",
        params![subject],
        |row| row.get::<_, i64>(0),
    )
    .map(|c| c as u64)
    .map_err(|e| to_storage_err(e.to_string()))
}

fn row_to_raw_snapshot(row: &rusqlite::Row<'_>) -> Result<RawSnapshot, rusqlite::Error> {
    Ok(RawSnapshot {
        snapshot_id: row.get::<_, i64>(0)? as u64,
        subject: row.get(1)?,
        agents: row.get(2)?,
        effective_at: row.get::<_, i64>(3)? as u64,
        recorded_block: row.get::<_, i64>(4)? as u64,
    })
}
