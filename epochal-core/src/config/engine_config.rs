//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the derivation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum snapshots examined per resolve query. Hitting the cap yields
    /// a distinguishable `Exhausted` outcome, never a silent fallback.
    pub resolver_scan_cap: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolver_scan_cap: 512,
        }
    }
}
