//! Raw SQL operations for the subjects registry.

use rusqlite::{params, Connection};

use epochal_core::EpochalResult;

use crate::to_storage_err;

/// Register a subject. Returns false if it already existed.
/// Subjects are never deleted.
pub fn insert_subject(
    conn: &Connection,
    subject: &str,
    registered_at: u64,
    registered_block: u64,
) -> EpochalResult<bool> {
    let changed = conn
        .execute(
            "INSERT OR IGNORE INTO subjects (subject, registered_at, registered_block)
             VALUES (?1, ?2, ?3)",
            params![subject, registered_at as i64, registered_block as i64],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}

pub fn subject_exists(conn: &Connection, subject: &str) -> EpochalResult<bool> {
    conn.prepare("SELECT 1 FROM subjects WHERE subject = ?1")
        .and_then(|mut stmt| stmt.exists(params![subject]))
        .map_err(|e| to_storage_err(e.to_string()))
}
