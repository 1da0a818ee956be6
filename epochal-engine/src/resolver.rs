//! TemporalResolver — point-in-time relationship resolution.
//!
//! Reading the current projection at event-processing time is wrong whenever
//! a third event needs the value that was in effect at *its own* timestamp,
//! not at the moment the attribution code happens to run. The resolver
//! materializes the actual state as of the query time by walking the
//! subject's recorded history backwards.

use epochal_core::models::ResolveOutcome;
use epochal_core::EpochalResult;
use epochal_storage::queries::snapshot_ops;
use epochal_storage::Database;

use crate::convert;

/// Resolve the agent set in effect for `subject` at `as_of`.
///
/// Walks the subject's snapshots in descending
/// `(effective_at, recorded_block, snapshot_id)` order and returns the first
/// with `effective_at <= as_of` — so for equal timestamps the snapshot
/// recorded at the later block wins. At most `scan_cap` snapshots are
/// examined; if the cap is hit before a qualifying snapshot is seen the
/// outcome is `Exhausted`, which callers must treat as "answer unknown",
/// never as "no prior state".
pub fn resolve(
    db: &Database,
    subject: &str,
    as_of: u64,
    fallback: Option<Vec<String>>,
    scan_cap: u32,
) -> EpochalResult<ResolveOutcome> {
    let rows = snapshot_ops::recent_snapshots(db.conn(), subject, scan_cap)?;
    let scanned = rows.len();

    for raw in rows {
        if raw.effective_at <= as_of {
            return Ok(ResolveOutcome::Resolved {
                snapshot_id: raw.snapshot_id,
                agents: convert::parse_agents(&raw.agents)?,
            });
        }
    }

    // Every fetched snapshot was newer than `as_of`. If we fetched a full
    // cap's worth, older qualifying history may exist beyond the cap.
    if scanned > 0 && scanned as u32 >= scan_cap {
        return Ok(ResolveOutcome::Exhausted);
    }

    match fallback {
        Some(agents) => Ok(ResolveOutcome::Fallback { agents }),
        None => Ok(ResolveOutcome::NoHistory),
    }
}
