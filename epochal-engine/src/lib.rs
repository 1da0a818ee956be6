//! # epochal-engine
//!
//! The temporal attribution & chained epoch aggregation engine:
//! append-only history ledger, point-in-time resolver, epoch chain with
//! close-time maturation aggregates, current-value projections, and the
//! event-handling facade driven by the external feed.

pub mod chain;
pub(crate) mod convert;
pub mod engine;
pub mod handlers;
pub mod ledger;
pub mod projection;
pub mod providers;
pub mod registry;
pub mod resolver;

pub use engine::DerivationEngine;
