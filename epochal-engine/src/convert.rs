//! Raw-row to domain-model conversions shared across engine modules.

use epochal_core::errors::StorageError;
use epochal_core::models::{
    Attribution, AttributionBasis, CarriedState, CurrentProjection, Epoch, EpochStatus,
    MaturingObligation, RelationshipSnapshot,
};
use epochal_core::{EpochalError, EpochalResult};
use epochal_storage::queries::attribution_ops::RawAttribution;
use epochal_storage::queries::epoch_ops::RawEpoch;
use epochal_storage::queries::obligation_ops::RawObligation;
use epochal_storage::queries::projection_ops::RawProjection;
use epochal_storage::queries::snapshot_ops::RawSnapshot;

fn corrupt(msg: String) -> EpochalError {
    EpochalError::Storage(StorageError::Corrupt { message: msg })
}

/// Parse a decimal TEXT amount into token base units.
pub fn parse_amount(s: &str) -> EpochalResult<u128> {
    s.parse::<u128>()
        .map_err(|_| corrupt(format!("non-numeric amount: {s:?}")))
}

/// Decode a JSON-encoded agent set.
pub fn parse_agents(s: &str) -> EpochalResult<Vec<String>> {
    serde_json::from_str(s).map_err(|e| corrupt(format!("bad agent set: {e}")))
}

/// Encode an agent set for storage.
pub fn encode_agents(agents: &[String]) -> EpochalResult<String> {
    Ok(serde_json::to_string(agents)?)
}

pub fn raw_to_snapshot(raw: RawSnapshot) -> EpochalResult<RelationshipSnapshot> {
    Ok(RelationshipSnapshot {
        snapshot_id: raw.snapshot_id,
        subject: raw.subject,
        agents: parse_agents(&raw.agents)?,
        effective_at: raw.effective_at,
        recorded_block: raw.recorded_block,
    })
}

pub fn raw_to_projection(raw: RawProjection) -> EpochalResult<CurrentProjection> {
    Ok(CurrentProjection {
        subject: raw.subject,
        agents: parse_agents(&raw.agents)?,
        updated_at: raw.updated_at,
    })
}

pub fn raw_to_epoch(raw: RawEpoch) -> EpochalResult<Epoch> {
    let status = match raw.status.as_str() {
        "open" => EpochStatus::Open,
        "closed" => EpochStatus::Closed,
        other => return Err(corrupt(format!("unknown epoch status: {other:?}"))),
    };

    let carried_state = match (raw.carried_total_bonded, raw.carried_reward_rate) {
        (Some(bonded), Some(rate)) => Some(CarriedState {
            total_bonded: parse_amount(&bonded)?,
            reward_rate: parse_amount(&rate)?,
        }),
        (None, None) => None,
        _ => {
            return Err(corrupt(format!(
                "epoch {} has a half-populated carried state",
                raw.sequence
            )))
        }
    };

    let matured_obligations: Vec<u64> = serde_json::from_str(&raw.matured_obligations)
        .map_err(|e| corrupt(format!("bad matured-obligation list: {e}")))?;

    Ok(Epoch {
        sequence: raw.sequence,
        start_boundary: raw.start_boundary,
        end_boundary: raw.end_boundary,
        closed_at: raw.closed_at,
        matured_total: parse_amount(&raw.matured_total)?,
        matured_obligations,
        carried_state,
        status,
    })
}

pub fn raw_to_obligation(raw: RawObligation) -> EpochalResult<MaturingObligation> {
    Ok(MaturingObligation {
        obligation_id: raw.obligation_id,
        created_in_epoch: raw.created_in_epoch,
        amount: parse_amount(&raw.amount)?,
        matures_at: raw.matures_at,
        matured_in_epoch: raw.matured_in_epoch,
    })
}

pub fn raw_to_attribution(raw: RawAttribution) -> EpochalResult<Attribution> {
    let basis = match (raw.basis.as_str(), raw.basis_snapshot_id) {
        ("snapshot", Some(snapshot_id)) => AttributionBasis::Snapshot { snapshot_id },
        ("projection", None) => AttributionBasis::Projection,
        (other, id) => {
            return Err(corrupt(format!(
                "inconsistent attribution basis: {other:?} / {id:?}"
            )))
        }
    };

    Ok(Attribution {
        attribution_id: raw.attribution_id,
        subject: raw.subject,
        agents: parse_agents(&raw.agents)?,
        amount: parse_amount(&raw.amount)?,
        occurred_at: raw.occurred_at,
        recorded_block: raw.recorded_block,
        basis,
    })
}
