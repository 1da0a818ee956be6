use serde::{Deserialize, Serialize};

/// An amount that becomes claimable at a specific future timestamp.
///
/// Recorded against the epoch that was open when the originating event
/// fired; logically matures in whichever epoch's
/// `(prev.end_boundary, end_boundary]` window contains `matures_at`.
/// Invariant: counted as matured in exactly one epoch, never zero, never
/// more than one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaturingObligation {
    /// Assigned by storage on insert.
    pub obligation_id: u64,
    /// Sequence of the epoch that was open at creation time.
    pub created_in_epoch: u64,
    /// Token base units.
    pub amount: u128,
    /// Unix seconds at which the obligation becomes claimable.
    pub matures_at: u64,
    /// Sequence of the epoch whose close counted this obligation, once set.
    pub matured_in_epoch: Option<u64>,
}
