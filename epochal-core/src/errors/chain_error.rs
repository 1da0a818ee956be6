/// Epoch-chain errors.
///
/// Everything except `NoOpenEpoch` on a read path is an invariant violation:
/// the chain's aggregates would be corrupted by continuing, so these are
/// fatal and must propagate to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("no open epoch: the chain has not been seeded or is mid-close")]
    NoOpenEpoch,

    #[error("epoch {sequence} not found")]
    UnknownEpoch { sequence: u64 },

    #[error(
        "epoch {sequence} close boundary {end_boundary} precedes its start boundary {start_boundary}"
    )]
    InvalidBoundary {
        sequence: u64,
        start_boundary: u64,
        end_boundary: u64,
    },

    #[error(
        "obligation {obligation_id} already matured in epoch {matured_in}, \
         selected again while closing epoch {closing}"
    )]
    DoubleMaturation {
        obligation_id: u64,
        matured_in: u64,
        closing: u64,
    },

    #[error(
        "maturation mark mismatch while closing epoch {closing}: \
         expected {expected} rows, updated {updated}"
    )]
    MaturationMismatch {
        closing: u64,
        expected: usize,
        updated: usize,
    },

    #[error(
        "obligation maturing at {matures_at} falls below epoch {sequence}'s window \
         (starts at {start_boundary}) and could never be counted"
    )]
    UnmaturableObligation {
        sequence: u64,
        start_boundary: u64,
        matures_at: u64,
    },

    #[error("matured total overflow while closing epoch {sequence}")]
    AggregateOverflow { sequence: u64 },

    #[error("correction for epoch {sequence} overflows the matured total")]
    CorrectionOverflow { sequence: u64 },
}
