mod carried_state_provider;

pub use carried_state_provider::CarriedStateProvider;
