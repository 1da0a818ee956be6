//! Epoch types: Epoch, EpochStatus, CarriedState, ClosedEpoch.

use serde::{Deserialize, Serialize};

/// One accounting interval in the chain.
///
/// Sequences are 1-based, gapless, strictly increasing. Epoch N+1 is created
/// the instant epoch N closes, with `start_boundary = N.end_boundary + 1` and
/// zeroed aggregates. A closed epoch is immutable and never reopens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epoch {
    pub sequence: u64,
    /// Inclusive lower boundary (unix seconds).
    pub start_boundary: u64,
    /// Inclusive upper boundary; `None` while the epoch is open.
    pub end_boundary: Option<u64>,
    /// Block timestamp of the close event; `None` while open.
    pub closed_at: Option<u64>,
    /// Sum of obligation amounts that matured in this epoch's window,
    /// accumulated only at close time (plus any registered correction).
    pub matured_total: u128,
    /// Ids of the obligations counted into `matured_total`.
    pub matured_obligations: Vec<u64>,
    /// Externally fetched point-in-time state, copied verbatim at close.
    /// `None` means the fetch failed and the value is *unavailable* —
    /// downstream consumers must never read this as zero.
    pub carried_state: Option<CarriedState>,
    pub status: EpochStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpochStatus {
    Open,
    Closed,
}

/// Contract state carried forward into a freshly provisioned epoch.
/// Fetched by an external provider at the close event's block; the chain
/// never computes this itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarriedState {
    /// Total bonded amount at the close block (token base units).
    pub total_bonded: u128,
    /// Per-epoch reward rate in effect at the close block.
    pub reward_rate: u128,
}

/// Summary returned by a successful close: the finalized epoch and the
/// freshly provisioned successor.
#[derive(Debug, Clone)]
pub struct ClosedEpoch {
    pub closed: Epoch,
    pub provisioned: Epoch,
}
