//! Configuration system for Graviton.
//!
//! Provides runtime-configurable tunables that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, validation of
//! numeric values, and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, LookConfig, PhysicsConfig, PlayerConfig, default_config_dir,
};
pub use error::ConfigError;
