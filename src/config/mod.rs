//! Settings file and per-invocation configuration.

pub mod run_config;
pub mod settings;

pub use run_config::{CliOverrides, RunConfig};
pub use settings::Settings;
