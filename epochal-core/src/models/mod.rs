mod attribution;
mod epoch;
mod event;
mod obligation;
mod projection;
mod resolution;
mod snapshot;

pub use attribution::{Attribution, AttributionBasis};
pub use epoch::{CarriedState, ClosedEpoch, Epoch, EpochStatus};
pub use event::{DomainEvent, EventMeta, FeedEvent};
pub use obligation::MaturingObligation;
pub use projection::CurrentProjection;
pub use resolution::ResolveOutcome;
pub use snapshot::RelationshipSnapshot;
