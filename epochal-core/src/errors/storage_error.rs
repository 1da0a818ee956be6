/// Persistence-layer errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite error: {message}")]
    SqliteError { message: String },

    #[error("migration v{version:03} failed: {reason}")]
    MigrationFailed { version: u32, reason: String },

    /// A persisted value could not be decoded (bad JSON, non-numeric amount).
    #[error("corrupt row: {message}")]
    Corrupt { message: String },
}
