use serde::{Deserialize, Serialize};

/// Outcome of a successful reward attribution: who the reward went to and
/// on what basis the resolver answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub attribution_id: u64,
    pub subject: String,
    /// The agent set in effect at `occurred_at`, as resolved.
    pub agents: Vec<String>,
    /// Token base units.
    pub amount: u128,
    /// The reward's own timestamp — NOT the processing time.
    pub occurred_at: u64,
    /// Block height of the event that carried the reward.
    pub recorded_block: u64,
    pub basis: AttributionBasis,
}

/// How the resolver arrived at the agent set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionBasis {
    /// A historical snapshot with `effective_at <= occurred_at` matched.
    Snapshot { snapshot_id: u64 },
    /// No history existed yet; the current projection answered.
    Projection,
}
