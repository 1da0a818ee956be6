//! Carried-state providers.

use epochal_core::errors::ProviderError;
use epochal_core::models::CarriedState;
use epochal_core::traits::CarriedStateProvider;

/// Provider returning a fixed carried state regardless of block.
/// Useful for bootstrapping and tests; production wires a live reader.
#[derive(Debug, Clone, Copy)]
pub struct StaticCarriedStateProvider {
    pub state: CarriedState,
}

impl StaticCarriedStateProvider {
    pub fn new(state: CarriedState) -> Self {
        Self { state }
    }
}

impl CarriedStateProvider for StaticCarriedStateProvider {
    fn fetch_carried_state(&self, _at_block: u64) -> Result<CarriedState, ProviderError> {
        Ok(self.state)
    }
}
