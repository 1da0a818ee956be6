//! ProjectionStore — current-value projections, one row per subject.
//!
//! Always reflects the most recently processed event for the subject. Used
//! as the resolver's fallback and for callers that explicitly want "latest
//! known" rather than "as of time T".

use epochal_core::models::CurrentProjection;
use epochal_core::EpochalResult;
use epochal_storage::queries::projection_ops;
use epochal_storage::Database;

use crate::convert;

pub fn upsert(
    db: &Database,
    subject: &str,
    agents: &[String],
    updated_at: u64,
) -> EpochalResult<()> {
    let agents_json = convert::encode_agents(agents)?;
    projection_ops::upsert_projection(db.conn(), subject, &agents_json, updated_at)
}

pub fn get(db: &Database, subject: &str) -> EpochalResult<Option<CurrentProjection>> {
    match projection_ops::get_projection(db.conn(), subject)? {
        Some(raw) => Ok(Some(convert::raw_to_projection(raw)?)),
        None => Ok(None),
    }
}
