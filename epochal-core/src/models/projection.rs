use serde::{Deserialize, Serialize};

/// Current-value projection: at most one row per subject, overwritten on
/// every relevant event. Reflects the most recently *processed* event,
/// irrespective of real-world timestamp ordering across subjects, so it is
/// only safe as a "latest known" answer or as the resolver's fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentProjection {
    pub subject: String,
    pub agents: Vec<String>,
    /// Block timestamp of the event that last overwrote this row.
    pub updated_at: u64,
}
