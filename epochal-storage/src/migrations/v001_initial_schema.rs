//! v001: subjects, snapshot log, projections, epoch chain, obligations,
//! attributions.

use rusqlite::Connection;

use epochal_core::EpochalResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> EpochalResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS subjects (
            subject          TEXT PRIMARY KEY,
            registered_at    INTEGER NOT NULL,
            registered_block INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS relationship_snapshots (
            snapshot_id    INTEGER PRIMARY KEY AUTOINCREMENT,
            subject        TEXT NOT NULL,
            agents         TEXT NOT NULL,
            effective_at   INTEGER NOT NULL,
            recorded_block INTEGER NOT NULL,
            UNIQUE(subject, agents, effective_at, recorded_block)
        );

        CREATE INDEX IF NOT EXISTS idx_snapshots_subject_time
            ON relationship_snapshots(subject, effective_at DESC, recorded_block DESC);

        CREATE TABLE IF NOT EXISTS current_projections (
            subject    TEXT PRIMARY KEY,
            agents     TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS epochs (
            sequence             INTEGER PRIMARY KEY,
            start_boundary       INTEGER NOT NULL,
            end_boundary         INTEGER,
            closed_at            INTEGER,
            matured_total        TEXT NOT NULL DEFAULT '0',
            matured_obligations  TEXT NOT NULL DEFAULT '[]',
            carried_total_bonded TEXT,
            carried_reward_rate  TEXT,
            status               TEXT NOT NULL DEFAULT 'open'
        );

        CREATE TABLE IF NOT EXISTS obligations (
            obligation_id    INTEGER PRIMARY KEY AUTOINCREMENT,
            created_in_epoch INTEGER NOT NULL,
            amount           TEXT NOT NULL,
            matures_at       INTEGER NOT NULL,
            matured_in_epoch INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_obligations_maturity
            ON obligations(matures_at);
        CREATE INDEX IF NOT EXISTS idx_obligations_matured_in
            ON obligations(matured_in_epoch);

        CREATE TABLE IF NOT EXISTS attributions (
            attribution_id    INTEGER PRIMARY KEY AUTOINCREMENT,
            subject           TEXT NOT NULL,
            agents            TEXT NOT NULL,
            amount            TEXT NOT NULL,
            occurred_at       INTEGER NOT NULL,
            recorded_block    INTEGER NOT NULL,
            basis             TEXT NOT NULL,
            basis_snapshot_id INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_attributions_subject
            ON attributions(subject, occurred_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
