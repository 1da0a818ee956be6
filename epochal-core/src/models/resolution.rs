/// Outcome of a temporal resolution query.
///
/// `NoHistory` and `Exhausted` are deliberately distinct: the former means
/// the subject definitively had no snapshot at or before the query time and
/// no fallback was supplied; the latter means the bounded scan gave up
/// before reaching that conclusion, so the answer may exist but was not
/// found. Callers must never fold `Exhausted` into a fallback answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// A snapshot with `effective_at <= as_of` matched.
    Resolved {
        agents: Vec<String>,
        snapshot_id: u64,
    },
    /// No snapshot qualified; the caller-supplied fallback was used.
    Fallback { agents: Vec<String> },
    /// No snapshot qualified and no fallback was available.
    NoHistory,
    /// The scan cap was hit before any qualifying snapshot was seen.
    Exhausted,
}

impl ResolveOutcome {
    /// The resolved agent set, if the query produced a usable answer.
    pub fn agents(&self) -> Option<&[String]> {
        match self {
            ResolveOutcome::Resolved { agents, .. } | ResolveOutcome::Fallback { agents } => {
                Some(agents)
            }
            ResolveOutcome::NoHistory | ResolveOutcome::Exhausted => None,
        }
    }
}
