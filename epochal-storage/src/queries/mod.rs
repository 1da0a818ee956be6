//! Raw SQL operations, one module per table family.

pub mod attribution_ops;
pub mod epoch_ops;
pub mod obligation_ops;
pub mod projection_ops;
pub mod snapshot_ops;
pub mod subject_ops;
