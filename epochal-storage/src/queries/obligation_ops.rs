//! Raw SQL operations for the obligations table.

use rusqlite::{params, Connection};

use epochal_core::EpochalResult;

use crate::to_storage_err;

/// Raw obligation row. `amount` is decimal TEXT.
#[derive(Debug, Clone)]
pub struct RawObligation {
    pub obligation_id: u64,
    pub created_in_epoch: u64,
    pub amount: String,
    pub matures_at: u64,
    pub matured_in_epoch: Option<u64>,
}

/// Insert an obligation against the epoch open at creation time.
/// Returns the assigned obligation_id.
pub fn insert_obligation(
    conn: &Connection,
    created_in_epoch: u64,
    amount: &str,
    matures_at: u64,
) -> EpochalResult<u64> {
    conn.execute(
        "INSERT INTO obligations (created_in_epoch, amount, matures_at)
         VALUES (?1, ?2, ?3)",
        params![created_in_epoch as i64, amount, matures_at as i64],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid() as u64)
}

/// Obligations maturing in the window `(lower_exclusive, upper_inclusive]`,
/// regardless of maturation status — the chain inspects `matured_in_epoch`
/// itself so it can detect double counting rather than silently skip it.
/// Bounded range query over idx_obligations_maturity.
pub fn maturing_in_window(
    conn: &Connection,
    lower_exclusive: u64,
    upper_inclusive: u64,
) -> EpochalResult<Vec<RawObligation>> {
    let mut stmt = conn
        .prepare(
            "SELECT obligation_id, created_in_epoch, amount, matures_at, matured_in_epoch
             FROM obligations
             WHERE matures_at > ?1 AND matures_at <= ?2
             ORDER BY obligation_id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(
            params![lower_exclusive as i64, upper_inclusive as i64],
            row_to_raw_obligation,
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Mark obligations as matured in `epoch`. Only not-yet-matured rows are
/// touched; returns how many were updated so the caller can verify the
/// exactly-once invariant.
pub fn mark_matured(conn: &Connection, ids: &[u64], epoch: u64) -> EpochalResult<usize> {
    let mut updated = 0;
    for &id in ids {
        updated += conn
            .execute(
                "UPDATE obligations SET matured_in_epoch = ?2
                 WHERE obligation_id = ?1 AND matured_in_epoch IS NULL",
                params![id as i64, epoch as i64],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(updated)
}

pub fn get_obligation(conn: &Connection, id: u64) -> EpochalResult<Option<RawObligation>> {
    let mut stmt = conn
        .prepare(
            "SELECT obligation_id, created_in_epoch, amount, matures_at, matured_in_epoch
             FROM obligations WHERE obligation_id = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut rows = stmt
        .query_map(params![id as i64], row_to_raw_obligation)
        .map_err(|e| to_storage_err(e.to_string()))?;

    match rows.next() {
        Some(row) => Ok(Some(row.map_err(|e| to_storage_err(e.to_string()))?)),
        None => Ok(None),
    }
}

/// Every obligation ever recorded, in insertion order. Feeds the reference
/// full-history rescan.
pub fn all_obligations(conn: &Connection) -> EpochalResult<Vec<RawObligation>> {
    let mut stmt = conn
        .prepare(
            "SELECT obligation_id, created_in_epoch, amount, matures_at, matured_in_epoch
             FROM obligations ORDER BY obligation_id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], row_to_raw_obligation)
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

fn row_to_raw_obligation(row: &rusqlite::Row<'_>) -> Result<RawObligation, rusqlite::Error> {
    Ok(RawObligation {
        obligation_id: row.get::<_, i64>(0)? as u64,
        created_in_epoch: row.get::<_, i64>(1)? as u64,
        amount: row.get(2)?,
        matures_at: row.get::<_, i64>(3)? as u64,
        matured_in_epoch: row.get::<_, Option<i64>>(4)?.map(|v| v as u64),
    })
}
