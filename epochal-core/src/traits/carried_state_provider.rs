//! Seam trait for the external state-snapshot provider.

use crate::errors::ProviderError;
use crate::models::CarriedState;

/// Point-in-time reader of the contract state carried into a new epoch.
///
/// Called exactly once per epoch close, with the close event's block.
/// Synchronous by contract: the engine processes one event to completion
/// at a time and treats external calls as blocking.
pub trait CarriedStateProvider {
    fn fetch_carried_state(&self, at_block: u64) -> Result<CarriedState, ProviderError>;
}
