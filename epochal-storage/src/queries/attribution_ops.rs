//! Raw SQL operations for the attributions table.

use rusqlite::{params, Connection};

use epochal_core::EpochalResult;

use crate::to_storage_err;

/// Raw attribution row. `basis` is 'snapshot' or 'projection';
/// `basis_snapshot_id` is set only for the former.
#[derive(Debug, Clone)]
pub struct RawAttribution {
    pub attribution_id: u64,
    pub subject: String,
    pub agents: String,
    pub amount: String,
    pub occurred_at: u64,
    pub recorded_block: u64,
    pub basis: String,
    pub basis_snapshot_id: Option<u64>,
}

#[allow(clippy::too_many_arguments)]
pub fn insert_attribution(
    conn: &Connection,
    subject: &str,
    agents: &str,
    amount: &str,
    occurred_at: u64,
    recorded_block: u64,
    basis: &str,
    basis_snapshot_id: Option<u64>,
) -> EpochalResult<u64> {
    conn.execute(
        "INSERT INTO attributions
            (subject, agents, amount, occurred_at, recorded_block, basis, basis_snapshot_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            subject,
            agents,
            amount,
            occurred_at as i64,
            recorded_block as i64,
            basis,
            basis_snapshot_id.map(|v| v as i64),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid() as u64)
}

/// All attributions recorded for a subject, oldest first.
pub fn attributions_for_subject(
    conn: &Connection,
    subject: &str,
) -> EpochalResult<Vec<RawAttribution>> {
    let mut stmt = conn
        .prepare(
            "SELECT attribution_id, subject, agents, amount, occurred_at,
                    recorded_block, basis, basis_snapshot_id
             FROM attributions WHERE subject = ?1
             ORDER BY attribution_id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![subject], |row| {
            Ok(RawAttribution {
                attribution_id: row.get::<_, i64>(0)? as u64,
                subject: row.get(1)?,
                agents: row.get(2)?,
                amount: row.get(3)?,
                occurred_at: row.get::<_, i64>(4)? as u64,
                recorded_block: row.get::<_, i64>(5)? as u64,
                basis: row.get(6)?,
                basis_snapshot_id: row.get::<_, Option<i64>>(7)?.map(|v| v as u64),
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}
