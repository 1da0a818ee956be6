//! # epochal-core
//!
//! Domain models, error taxonomy, configuration, and seam traits for the
//! epochal temporal-attribution and chained-epoch engine. No I/O lives here.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

pub use errors::{EpochalError, EpochalResult};
