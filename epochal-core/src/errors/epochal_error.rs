use super::{ChainError, LedgerError, ProviderError, StorageError};

/// Top-level error type for the epochal engine.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum EpochalError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("epoch chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("carried-state provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias.
pub type EpochalResult<T> = Result<T, EpochalError>;
