//! Decoded domain events as delivered by the external feed.

use serde::{Deserialize, Serialize};

/// Per-event metadata from the originating log entry.
///
/// The feed guarantees delivery in non-decreasing `(block_number, log_index)`
/// order, exactly once; the engine trusts that order and performs no reorg
/// handling of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeta {
    pub block_number: u64,
    /// Unix seconds of the containing block.
    pub block_timestamp: u64,
    pub log_index: u64,
    pub tx_hash: String,
}

/// One decoded event plus its log metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEvent {
    pub meta: EventMeta,
    pub payload: DomainEvent,
}

/// The event payloads the engine reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainEvent {
    /// A new subject came into existence with an initial agent set.
    SubjectRegistered { subject: String, agents: Vec<String> },
    /// A subject's agent set changed.
    AgentsChanged { subject: String, agents: Vec<String> },
    /// A reward was earned at `occurred_at` and must be attributed to
    /// whoever was the subject's agent set *at that timestamp*.
    RewardAttributed {
        subject: String,
        amount: u128,
        occurred_at: u64,
    },
    /// A maturing obligation was created against the open epoch.
    ObligationCreated { amount: u128, matures_at: u64 },
    /// Epoch boundary: close the open epoch and provision its successor.
    EpochAdvanced,
}
