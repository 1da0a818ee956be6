//! Subject registry — explicitly owned, storage-backed.
//!
//! Replaces process-wide discovered-address caches: the registry travels
//! with the engine's database handle, so independent chains in one process
//! cannot cross-contaminate. Subjects are never fabricated on reference and
//! never deleted.

use epochal_core::models::EventMeta;
use epochal_core::EpochalResult;
use epochal_storage::queries::subject_ops;
use epochal_storage::Database;

/// Register a subject at its creation event. Returns false if it was
/// already registered (the original registration stands).
pub fn register(db: &Database, subject: &str, meta: &EventMeta) -> EpochalResult<bool> {
    subject_ops::insert_subject(db.conn(), subject, meta.block_timestamp, meta.block_number)
}

pub fn is_registered(db: &Database, subject: &str) -> EpochalResult<bool> {
    subject_ops::subject_exists(db.conn(), subject)
}
