mod bootstrap_config;
mod engine_config;

pub use bootstrap_config::{BootstrapConfig, EpochCorrection, GenesisSeed};
pub use engine_config::EngineConfig;
