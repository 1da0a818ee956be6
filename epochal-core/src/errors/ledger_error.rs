/// History-ledger errors. Appends never fail except on malformed input.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("snapshot append rejected: empty subject")]
    EmptySubject,
}
