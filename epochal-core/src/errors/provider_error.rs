/// Errors from the external carried-state provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The point-in-time read reverted on the source side.
    #[error("carried-state call reverted at block {at_block}")]
    CallReverted { at_block: u64 },

    #[error("carried-state fetch failed at block {at_block}: {message}")]
    FetchFailed { at_block: u64, message: String },
}
