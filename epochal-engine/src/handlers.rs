//! Per-event handlers.
//!
//! Each handler runs one event to completion. Recoverable conditions
//! (unknown subject, ambiguous attribution, carried-state fetch failure)
//! skip the affected update with a warning and let processing continue;
//! chain invariant violations propagate as errors and stop the feed.

use tracing::{debug, warn};

use epochal_core::config::{BootstrapConfig, EngineConfig};
use epochal_core::models::{EventMeta, ResolveOutcome};
use epochal_core::traits::CarriedStateProvider;
use epochal_core::EpochalResult;
use epochal_storage::queries::attribution_ops;
use epochal_storage::Database;

use crate::{chain, convert, ledger, projection, registry, resolver};

pub fn handle_subject_registered(
    db: &Database,
    subject: &str,
    agents: &[String],
    meta: &EventMeta,
) -> EpochalResult<()> {
    // Checked before any write: a fabricated "" subject must leave no
    // registry or projection residue behind.
    if subject.is_empty() {
        warn!("registration with empty subject, skipping");
        return Ok(());
    }
    if !registry::register(db, subject, meta)? {
        warn!(subject, "duplicate registration ignored");
        return Ok(());
    }
    projection::upsert(db, subject, agents, meta.block_timestamp)?;
    ledger::append(db, subject, agents, meta.block_timestamp, meta.block_number)?;
    debug!(subject, "registered subject");
    Ok(())
}

pub fn handle_agents_changed(
    db: &Database,
    subject: &str,
    agents: &[String],
    meta: &EventMeta,
) -> EpochalResult<()> {
    if !registry::is_registered(db, subject)? {
        warn!(subject, "agents change for unknown subject, skipping");
        return Ok(());
    }
    projection::upsert(db, subject, agents, meta.block_timestamp)?;
    ledger::append(db, subject, agents, meta.block_timestamp, meta.block_number)?;
    Ok(())
}

/// Attribute a reward to the agent set in effect at the reward's own
/// timestamp — not at processing time. The current projection serves as
/// fallback only when the subject has no recorded history at all.
pub fn handle_reward_attributed(
    db: &Database,
    config: &EngineConfig,
    subject: &str,
    amount: u128,
    occurred_at: u64,
    meta: &EventMeta,
) -> EpochalResult<()> {
    if !registry::is_registered(db, subject)? {
        warn!(subject, "reward for unknown subject, skipping");
        return Ok(());
    }

    let fallback = projection::get(db, subject)?.map(|p| p.agents);
    let outcome = resolver::resolve(db, subject, occurred_at, fallback, config.resolver_scan_cap)?;

    let (agents, basis, basis_snapshot_id) = match outcome {
        ResolveOutcome::Resolved {
            agents,
            snapshot_id,
        } => (agents, "snapshot", Some(snapshot_id)),
        ResolveOutcome::Fallback { agents } => (agents, "projection", None),
        ResolveOutcome::NoHistory => {
            warn!(
                subject,
                occurred_at, "no resolvable agent set, skipping attribution"
            );
            return Ok(());
        }
        ResolveOutcome::Exhausted => {
            warn!(
                subject,
                occurred_at,
                cap = config.resolver_scan_cap,
                "resolver scan cap reached, skipping attribution rather than guessing"
            );
            return Ok(());
        }
    };

    let agents_json = convert::encode_agents(&agents)?;
    attribution_ops::insert_attribution(
        db.conn(),
        subject,
        &agents_json,
        &amount.to_string(),
        occurred_at,
        meta.block_number,
        basis,
        basis_snapshot_id,
    )?;
    Ok(())
}

pub fn handle_obligation_created(
    db: &Database,
    amount: u128,
    matures_at: u64,
) -> EpochalResult<()> {
    chain::record_obligation(db, amount, matures_at)?;
    Ok(())
}

/// Epoch boundary: fetch carried state at the boundary block, then close.
/// A failed fetch downgrades to a flagged-unavailable close — the chain
/// must not stall on a reverted call.
pub fn handle_epoch_advanced(
    db: &Database,
    provider: &dyn CarriedStateProvider,
    bootstrap: &BootstrapConfig,
    meta: &EventMeta,
) -> EpochalResult<()> {
    let carried = match provider.fetch_carried_state(meta.block_number) {
        Ok(state) => Some(state),
        Err(e) => {
            warn!(
                at_block = meta.block_number,
                "carried-state fetch failed: {e}"
            );
            None
        }
    };
    chain::close_epoch(db, meta, carried, bootstrap)?;
    Ok(())
}
