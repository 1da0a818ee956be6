//! Bootstrap constants: genesis epoch seed and one-time corrections.
//!
//! Epoch 1 has no predecessor to derive its boundaries from, so they are
//! supplied here. Corrections are hand-applied adjustments to a specific
//! epoch's computed matured total, compensating for known discrepancies in
//! upstream data. They are externally supplied, reviewed constants — the
//! engine applies them verbatim and logs the registered reason; it does not
//! attempt to verify their magnitude.

use serde::{Deserialize, Serialize};

/// Persisted configuration seeding the epoch chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub genesis: GenesisSeed,
    /// Auditable correction table, keyed by epoch sequence. Applied once,
    /// at that epoch's close.
    pub corrections: Vec<EpochCorrection>,
}

/// Seed values for epoch 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisSeed {
    /// Inclusive start boundary of epoch 1 (unix seconds).
    pub start_boundary: u64,
    /// Seed matured total for epoch 1, normally zero.
    pub matured_total: u128,
}

impl Default for GenesisSeed {
    fn default() -> Self {
        Self {
            start_boundary: 0,
            matured_total: 0,
        }
    }
}

/// One named, auditable correction to a specific epoch's matured total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochCorrection {
    /// Epoch whose close this correction adjusts.
    pub sequence: u64,
    /// Signed delta added to the computed matured total.
    pub matured_total_delta: i128,
    /// The documented source discrepancy this compensates for.
    pub reason: String,
}

impl BootstrapConfig {
    /// The correction registered for a given epoch sequence, if any.
    pub fn correction_for(&self, sequence: u64) -> Option<&EpochCorrection> {
        self.corrections.iter().find(|c| c.sequence == sequence)
    }
}
