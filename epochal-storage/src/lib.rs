//! # epochal-storage
//!
//! SQLite persistence layer for the epochal engine: append-only snapshot
//! log, projection rows, epoch chain, obligations, attributions.
//! Single connection — the engine is single-threaded by contract.

pub mod migrations;
pub mod queries;

use std::path::Path;

use rusqlite::Connection;

use epochal_core::errors::StorageError;
use epochal_core::{EpochalError, EpochalResult};

/// Helper to convert a string message into an `EpochalError::Storage`.
pub fn to_storage_err(msg: String) -> EpochalError {
    EpochalError::Storage(StorageError::SqliteError { message: msg })
}

/// Owns the single SQLite connection. One logical writer, no internal
/// locking: callers are the single event-processing thread.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database file, apply pragmas, run migrations.
    pub fn open(path: &Path) -> EpochalResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::init(conn)
    }

    /// In-memory database, mainly for tests.
    pub fn open_in_memory() -> EpochalResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> EpochalResult<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Run `f` inside a single transaction. Rolls back on error — callers
    /// rely on this for the no-partial-commit guarantee at epoch close.
    pub fn in_transaction<T>(
        &self,
        f: impl FnOnce(&Connection) -> EpochalResult<T>,
    ) -> EpochalResult<T> {
        self.conn
            .execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| to_storage_err(format!("begin transaction: {e}")))?;
        match f(&self.conn) {
            Ok(value) => {
                self.conn
                    .execute_batch("COMMIT")
                    .map_err(|e| to_storage_err(format!("commit: {e}")))?;
                Ok(value)
            }
            Err(e) => {
                let _ = self.conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }
}
