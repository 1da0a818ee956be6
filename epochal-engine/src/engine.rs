//! DerivationEngine — central orchestrator over the ledger, resolver,
//! projections, and epoch chain.

use epochal_core::config::{BootstrapConfig, EngineConfig};
use epochal_core::models::{
    Attribution, CurrentProjection, DomainEvent, Epoch, FeedEvent, ResolveOutcome,
};
use epochal_core::traits::CarriedStateProvider;
use epochal_core::EpochalResult;
use epochal_storage::queries::attribution_ops;
use epochal_storage::Database;

use crate::{chain, convert, handlers, projection, resolver};

/// The derived-state engine.
///
/// Owns its database and carried-state provider outright — no process-wide
/// state, so independent chains can run side by side in one process.
/// Single-threaded by contract: one event is handled to completion before
/// the next is admitted.
pub struct DerivationEngine {
    db: Database,
    provider: Box<dyn CarriedStateProvider>,
    config: EngineConfig,
    bootstrap: BootstrapConfig,
}

impl DerivationEngine {
    /// Create an engine and seed the genesis epoch if the chain is empty.
    pub fn new(
        db: Database,
        provider: Box<dyn CarriedStateProvider>,
        config: EngineConfig,
        bootstrap: BootstrapConfig,
    ) -> EpochalResult<Self> {
        chain::ensure_genesis(&db, &bootstrap)?;
        Ok(Self {
            db,
            provider,
            config,
            bootstrap,
        })
    }

    /// Process one decoded feed event to completion.
    ///
    /// Recoverable conditions are logged and skipped; an `Err` here means an
    /// invariant violation or storage failure, and the caller must stop the
    /// feed rather than continue past it.
    pub fn handle_event(&self, event: &FeedEvent) -> EpochalResult<()> {
        match &event.payload {
            DomainEvent::SubjectRegistered { subject, agents } => {
                handlers::handle_subject_registered(&self.db, subject, agents, &event.meta)
            }
            DomainEvent::AgentsChanged { subject, agents } => {
                handlers::handle_agents_changed(&self.db, subject, agents, &event.meta)
            }
            DomainEvent::RewardAttributed {
                subject,
                amount,
                occurred_at,
            } => handlers::handle_reward_attributed(
                &self.db,
                &self.config,
                subject,
                *amount,
                *occurred_at,
                &event.meta,
            ),
            DomainEvent::ObligationCreated { amount, matures_at } => {
                handlers::handle_obligation_created(&self.db, *amount, *matures_at)
            }
            DomainEvent::EpochAdvanced => handlers::handle_epoch_advanced(
                &self.db,
                self.provider.as_ref(),
                &self.bootstrap,
                &event.meta,
            ),
        }
    }

    // ── Read surface (downstream consumers, read-only) ──────────────────

    /// Latest-known projection for a subject.
    pub fn current_projection(&self, subject: &str) -> EpochalResult<Option<CurrentProjection>> {
        projection::get(&self.db, subject)
    }

    /// The agent set in effect at `as_of`, with the projection as fallback.
    pub fn resolve_at(&self, subject: &str, as_of: u64) -> EpochalResult<ResolveOutcome> {
        let fallback = projection::get(&self.db, subject)?.map(|p| p.agents);
        resolver::resolve(
            &self.db,
            subject,
            as_of,
            fallback,
            self.config.resolver_scan_cap,
        )
    }

    pub fn epoch(&self, sequence: u64) -> EpochalResult<Option<Epoch>> {
        chain::get_epoch(&self.db, sequence)
    }

    pub fn open_epoch(&self) -> EpochalResult<Option<Epoch>> {
        chain::open_epoch(&self.db)
    }

    pub fn attributions_for(&self, subject: &str) -> EpochalResult<Vec<Attribution>> {
        let raw = attribution_ops::attributions_for_subject(self.db.conn(), subject)?;
        raw.into_iter().map(convert::raw_to_attribution).collect()
    }

    /// Direct handle to the backing store, for read-only inspection.
    pub fn database(&self) -> &Database {
        &self.db
    }
}
