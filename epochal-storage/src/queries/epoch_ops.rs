//! Raw SQL operations for the epochs table.
//!
//! Only the chain logic in epochal-engine calls the mutating functions here;
//! no other component touches epoch aggregates.

use rusqlite::{params, Connection};

use epochal_core::EpochalResult;

use crate::to_storage_err;

/// Raw epoch row. Amounts are decimal TEXT, matured_obligations is a JSON
/// id array. Carried-state columns are both NULL when the close-time fetch
/// failed (flagged unavailable, never zero).
#[derive(Debug, Clone)]
pub struct RawEpoch {
    pub sequence: u64,
    pub start_boundary: u64,
    pub end_boundary: Option<u64>,
    pub closed_at: Option<u64>,
    pub matured_total: String,
    pub matured_obligations: String,
    pub carried_total_bonded: Option<String>,
    pub carried_reward_rate: Option<String>,
    pub status: String,
}

/// Insert a fresh open epoch with zeroed (or seeded) aggregates.
pub fn insert_epoch(
    conn: &Connection,
    sequence: u64,
    start_boundary: u64,
    matured_total: &str,
) -> EpochalResult<()> {
    conn.execute(
        "INSERT INTO epochs (sequence, start_boundary, matured_total, status)
         VALUES (?1, ?2, ?3, 'open')",
        params![sequence as i64, start_boundary as i64, matured_total],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_epoch(conn: &Connection, sequence: u64) -> EpochalResult<Option<RawEpoch>> {
    query_one(
        conn,
        "SELECT sequence, start_boundary, end_boundary, closed_at, matured_total,
                matured_obligations, carried_total_bonded, carried_reward_rate, status
         FROM epochs WHERE sequence = ?1",
        params![sequence as i64],
    )
}

/// The currently open epoch. The chain maintains exactly one at all times
/// once seeded.
pub fn open_epoch(conn: &Connection) -> EpochalResult<Option<RawEpoch>> {
    query_one(
        conn,
        "SELECT sequence, start_boundary, end_boundary, closed_at, matured_total,
                matured_obligations, carried_total_bonded, carried_reward_rate, status
         FROM epochs WHERE status = 'open'
         ORDER BY sequence DESC LIMIT 1",
        [],
    )
}

/// Highest sequence in the chain, 0 if unseeded.
pub fn max_sequence(conn: &Connection) -> EpochalResult<u64> {
    conn.query_row("SELECT COALESCE(MAX(sequence), 0) FROM epochs", [], |row| {
        row.get::<_, i64>(0)
    })
    .map(|s| s as u64)
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Finalize an open epoch: fix boundaries, aggregates, carried state, and
/// flip status to closed. Returns the number of rows updated so the caller
/// can verify the epoch was still open (exactly 1).
#[allow(clippy::too_many_arguments)]
pub fn finalize_epoch(
    conn: &Connection,
    sequence: u64,
    end_boundary: u64,
    closed_at: u64,
    matured_total: &str,
    matured_obligations: &str,
    carried: Option<(&str, &str)>,
) -> EpochalResult<usize> {
    let (bonded, rate) = match carried {
        Some((b, r)) => (Some(b), Some(r)),
        None => (None, None),
    };
    conn.execute(
        "UPDATE epochs SET
            end_boundary = ?2,
            closed_at = ?3,
            matured_total = ?4,
            matured_obligations = ?5,
            carried_total_bonded = ?6,
            carried_reward_rate = ?7,
            status = 'closed'
         WHERE sequence = ?1 AND status = 'open'",
        params![
            sequence as i64,
            end_boundary as i64,
            closed_at as i64,
            matured_total,
            matured_obligations,
            bonded,
            rate,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

fn query_one<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> EpochalResult<Option<RawEpoch>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params, row_to_raw_epoch)
        .map_err(|e| to_storage_err(e.to_string()))?;
    match rows.next() {
        Some(row) => Ok(Some(row.map_err(|e| to_storage_err(e.to_string()))?)),
        None => Ok(None),
    }
}

fn row_to_raw_epoch(row: &rusqlite::Row<'_>) -> Result<RawEpoch, rusqlite::Error> {
    Ok(RawEpoch {
        sequence: row.get::<_, i64>(0)? as u64,
        start_boundary: row.get::<_, i64>(1)? as u64,
        end_boundary: row.get::<_, Option<i64>>(2)?.map(|v| v as u64),
        closed_at: row.get::<_, Option<i64>>(3)?.map(|v| v as u64),
        matured_total: row.get(4)?,
        matured_obligations: row.get(5)?,
        carried_total_bonded: row.get(6)?,
        carried_reward_rate: row.get(7)?,
        status: row.get(8)?,
    })
}
