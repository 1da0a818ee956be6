mod chain_error;
mod epochal_error;
mod ledger_error;
mod provider_error;
mod storage_error;

pub use chain_error::ChainError;
pub use epochal_error::{EpochalError, EpochalResult};
pub use ledger_error::LedgerError;
pub use provider_error::ProviderError;
pub use storage_error::StorageError;
