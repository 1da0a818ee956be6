//! Raw SQL operations for the current_projections table.

use rusqlite::{params, Connection};

use epochal_core::EpochalResult;

use crate::to_storage_err;

/// Raw projection row. `agents` is the JSON-encoded agent set.
#[derive(Debug, Clone)]
pub struct RawProjection {
    pub subject: String,
    pub agents: String,
    pub updated_at: u64,
}

/// Overwrite (or create) the subject's projection row.
pub fn upsert_projection(
    conn: &Connection,
    subject: &str,
    agents: &str,
    updated_at: u64,
) -> EpochalResult<()> {
    conn.execute(
        "INSERT INTO current_projections (subject, agents, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(subject) DO UPDATE SET
            agents = excluded.agents,
            updated_at = excluded.updated_at",
        params![subject, agents, updated_at as i64],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Latest-known projection for a subject, if any.
pub fn get_projection(conn: &Connection, subject: &str) -> EpochalResult<Option<RawProjection>> {
    let mut stmt = conn
        .prepare(
            "SELECT subject, agents, updated_at
             FROM current_projections WHERE subject = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut rows = stmt
        .query_map(params![subject], |row| {
            Ok(RawProjection {
                subject: row.get(0)?,
                agents: row.get(1)?,
                updated_at: row.get::<_, i64>(2)? as u64,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    match rows.next() {
        Some(row) => Ok(Some(row.map_err(|e| to_storage_err(e.to_string()))?)),
        None => Ok(None),
    }
}
