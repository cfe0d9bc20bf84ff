//! Command-line argument parsing for the headless runner.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Graviton command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "graviton", about = "First-person locomotion and gravity-gun sandbox")]
pub struct CliArgs {
    /// Horizontal walk acceleration.
    #[arg(long)]
    pub walk_speed: Option<f32>,

    /// Jump strength.
    #[arg(long)]
    pub jump_strength: Option<f32>,

    /// Gravity-gun fling impulse.
    #[arg(long)]
    pub gravity_gun_force: Option<f32>,

    /// Fixed physics tick rate in Hz.
    #[arg(long)]
    pub fixed_hz: Option<u32>,

    /// Number of simulated seconds to run the demo scene for.
    #[arg(long, default_value_t = 6.0)]
    pub seconds: f32,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(speed) = args.walk_speed {
            self.player.walk_speed = speed;
        }
        if let Some(jump) = args.jump_strength {
            self.player.jump_strength = jump;
        }
        if let Some(force) = args.gravity_gun_force {
            self.player.gravity_gun_force = force;
        }
        if let Some(hz) = args.fixed_hz {
            self.physics.fixed_hz = hz;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
