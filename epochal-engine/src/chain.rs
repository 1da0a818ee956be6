//! EpochChain — singly linked, forward-growing sequence of accounting
//! epochs.
//!
//! Epochs close in order; closing epoch N finalizes its maturation
//! aggregates and immediately provisions epoch N+1 in the same transaction,
//! with `start_boundary = N.end_boundary + 1` and zeroed aggregates. A
//! closed epoch never reopens and its aggregates are immutable.

use tracing::{debug, info, warn};

use epochal_core::config::BootstrapConfig;
use epochal_core::errors::ChainError;
use epochal_core::models::{CarriedState, ClosedEpoch, Epoch, EventMeta, MaturingObligation};
use epochal_core::EpochalResult;
use epochal_storage::queries::{epoch_ops, obligation_ops};
use epochal_storage::Database;

use crate::convert;

/// Seed epoch 1 from the bootstrap constants if the chain is empty.
/// Idempotent: an already-seeded chain is left untouched.
pub fn ensure_genesis(db: &Database, bootstrap: &BootstrapConfig) -> EpochalResult<()> {
    if epoch_ops::max_sequence(db.conn())? > 0 {
        return Ok(());
    }
    epoch_ops::insert_epoch(
        db.conn(),
        1,
        bootstrap.genesis.start_boundary,
        &bootstrap.genesis.matured_total.to_string(),
    )?;
    info!(
        start_boundary = bootstrap.genesis.start_boundary,
        "seeded genesis epoch"
    );
    Ok(())
}

/// Record a maturing obligation against the currently open epoch — always
/// the epoch open when the originating event fired, never the epoch the
/// obligation will mature in.
///
/// `matures_at` must lie above the open epoch's window lower bound:
/// anything at or below it would fall outside every future close window
/// and never mature, breaking the count-exactly-once guarantee.
pub fn record_obligation(db: &Database, amount: u128, matures_at: u64) -> EpochalResult<u64> {
    let open = epoch_ops::open_epoch(db.conn())?.ok_or(ChainError::NoOpenEpoch)?;
    if matures_at <= open.start_boundary.saturating_sub(1) {
        return Err(ChainError::UnmaturableObligation {
            sequence: open.sequence,
            start_boundary: open.start_boundary,
            matures_at,
        }
        .into());
    }
    let id = obligation_ops::insert_obligation(
        db.conn(),
        open.sequence,
        &amount.to_string(),
        matures_at,
    )?;
    debug!(
        obligation_id = id,
        epoch = open.sequence,
        matures_at,
        "recorded obligation"
    );
    Ok(id)
}

/// Close the open epoch at the triggering event's timestamp and provision
/// its successor.
///
/// Maturation window: obligations (from any epoch) with
/// `matures_at` in `(prev.end_boundary, end_boundary]`. The selection is a
/// bounded range query over the maturity index; `matured_in_window_rescan`
/// preserves the full-history rescan as the reference behavior.
///
/// `carried` is the externally fetched point-in-time state; `None` means
/// the fetch failed and the epoch closes with carried state flagged
/// unavailable. The epoch-row update, obligation marking, and successor
/// creation commit atomically — a failure leaves the open epoch untouched
/// and the close can be retried on the next boundary-compatible event.
pub fn close_epoch(
    db: &Database,
    meta: &EventMeta,
    carried: Option<CarriedState>,
    bootstrap: &BootstrapConfig,
) -> EpochalResult<ClosedEpoch> {
    let open = epoch_ops::open_epoch(db.conn())?.ok_or(ChainError::NoOpenEpoch)?;
    let end_boundary = meta.block_timestamp;

    if end_boundary < open.start_boundary {
        return Err(ChainError::InvalidBoundary {
            sequence: open.sequence,
            start_boundary: open.start_boundary,
            end_boundary,
        }
        .into());
    }

    let lower_exclusive = window_lower_bound(db, &open)?;
    let candidates = obligation_ops::maturing_in_window(db.conn(), lower_exclusive, end_boundary)?;

    // Seeded for epoch 1 (bootstrap), '0' for every provisioned epoch.
    let mut matured_total = convert::parse_amount(&open.matured_total)?;
    let mut matured_ids = Vec::with_capacity(candidates.len());

    for raw in &candidates {
        if let Some(prior) = raw.matured_in_epoch {
            return Err(ChainError::DoubleMaturation {
                obligation_id: raw.obligation_id,
                matured_in: prior,
                closing: open.sequence,
            }
            .into());
        }
        matured_total = matured_total
            .checked_add(convert::parse_amount(&raw.amount)?)
            .ok_or(ChainError::AggregateOverflow {
                sequence: open.sequence,
            })?;
        matured_ids.push(raw.obligation_id);
    }

    if let Some(correction) = bootstrap.correction_for(open.sequence) {
        warn!(
            sequence = open.sequence,
            delta = correction.matured_total_delta,
            reason = %correction.reason,
            "applying bootstrap correction to matured total"
        );
        matured_total = apply_delta(matured_total, correction.matured_total_delta).ok_or(
            ChainError::CorrectionOverflow {
                sequence: open.sequence,
            },
        )?;
    }

    let matured_json = serde_json::to_string(&matured_ids)?;
    let carried_strings = carried.map(|c| (c.total_bonded.to_string(), c.reward_rate.to_string()));
    if carried_strings.is_none() {
        warn!(
            sequence = open.sequence,
            "closing with carried state unavailable"
        );
    }
    let next_sequence = open.sequence + 1;
    let next_start = end_boundary + 1;

    db.in_transaction(|conn| {
        let updated = epoch_ops::finalize_epoch(
            conn,
            open.sequence,
            end_boundary,
            meta.block_timestamp,
            &matured_total.to_string(),
            &matured_json,
            carried_strings
                .as_ref()
                .map(|(bonded, rate)| (bonded.as_str(), rate.as_str())),
        )?;
        if updated != 1 {
            return Err(ChainError::NoOpenEpoch.into());
        }

        let marked = obligation_ops::mark_matured(conn, &matured_ids, open.sequence)?;
        if marked != matured_ids.len() {
            return Err(ChainError::MaturationMismatch {
                closing: open.sequence,
                expected: matured_ids.len(),
                updated: marked,
            }
            .into());
        }

        epoch_ops::insert_epoch(conn, next_sequence, next_start, "0")?;
        Ok(())
    })?;

    info!(
        sequence = open.sequence,
        end_boundary,
        matured = matured_ids.len(),
        next = next_sequence,
        "closed epoch and provisioned successor"
    );

    let closed = get_epoch(db, open.sequence)?.ok_or(ChainError::UnknownEpoch {
        sequence: open.sequence,
    })?;
    let provisioned = get_epoch(db, next_sequence)?.ok_or(ChainError::UnknownEpoch {
        sequence: next_sequence,
    })?;

    Ok(ClosedEpoch {
        closed,
        provisioned,
    })
}

/// Exclusive lower bound of an epoch's maturation window: the previous
/// closed epoch's end boundary. Epoch 1 has no predecessor; the gapless
/// `start = prev.end + 1` invariant makes `start_boundary - 1` the same
/// value, so it stands in for the missing boundary.
fn window_lower_bound(
    db: &Database,
    open: &epoch_ops::RawEpoch,
) -> EpochalResult<u64> {
    if open.sequence == 1 {
        return Ok(open.start_boundary.saturating_sub(1));
    }
    let prev = epoch_ops::get_epoch(db.conn(), open.sequence - 1)?.ok_or(
        ChainError::UnknownEpoch {
            sequence: open.sequence - 1,
        },
    )?;
    prev.end_boundary.ok_or_else(|| {
        ChainError::UnknownEpoch {
            sequence: open.sequence - 1,
        }
        .into()
    })
}

/// Reference maturation selection: scan every obligation ever recorded,
/// from epoch 1 through now, and pick those maturing in
/// `(lower_exclusive, upper_inclusive]`. Kept as the observable contract
/// the indexed range query in `close_epoch` must match; exercised by tests.
pub fn matured_in_window_rescan(
    db: &Database,
    lower_exclusive: u64,
    upper_inclusive: u64,
) -> EpochalResult<Vec<u64>> {
    let all = obligation_ops::all_obligations(db.conn())?;
    Ok(all
        .into_iter()
        .filter(|o| o.matures_at > lower_exclusive && o.matures_at <= upper_inclusive)
        .map(|o| o.obligation_id)
        .collect())
}

pub fn get_epoch(db: &Database, sequence: u64) -> EpochalResult<Option<Epoch>> {
    match epoch_ops::get_epoch(db.conn(), sequence)? {
        Some(raw) => Ok(Some(convert::raw_to_epoch(raw)?)),
        None => Ok(None),
    }
}

/// The currently open epoch, if the chain has been seeded.
pub fn open_epoch(db: &Database) -> EpochalResult<Option<Epoch>> {
    match epoch_ops::open_epoch(db.conn())? {
        Some(raw) => Ok(Some(convert::raw_to_epoch(raw)?)),
        None => Ok(None),
    }
}

pub fn get_obligation(db: &Database, id: u64) -> EpochalResult<Option<MaturingObligation>> {
    match obligation_ops::get_obligation(db.conn(), id)? {
        Some(raw) => Ok(Some(convert::raw_to_obligation(raw)?)),
        None => Ok(None),
    }
}

fn apply_delta(total: u128, delta: i128) -> Option<u128> {
    if delta >= 0 {
        total.checked_add(delta as u128)
    } else {
        total.checked_sub(delta.unsigned_abs())
    }
}
