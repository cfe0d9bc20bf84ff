//! The binary entry point for the headless Graviton sandbox.

use std::error::Error;

use clap::Parser;
use graviton_app::{ConfigWatcher, InputScript, Simulation};
use graviton_config::{CliArgs, Config, default_config_dir};
use tracing::info;

/// Seconds of simulated time between config reload checks.
const RELOAD_INTERVAL: f32 = 1.0;

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();

    let config_dir = match &args.config {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };
    let on_disk = Config::load_or_create(&config_dir)?;
    let mut watcher = ConfigWatcher::new(config_dir.clone(), on_disk, args.clone());
    let config = watcher.effective();
    config.validate()?;

    let log_dir = dirs::data_local_dir().map(|d| d.join("graviton").join("logs"));
    graviton_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));
    info!(config_dir = %config_dir.display(), "Graviton sandbox starting");

    let mut sim = Simulation::new(&config, InputScript::demo());
    info!(
        props = sim.scene().props.len(),
        fixed_hz = config.physics.fixed_hz,
        seconds = args.seconds,
        "Demo scene ready"
    );

    while sim.clock() < args.seconds {
        let until = (sim.clock() + RELOAD_INTERVAL).min(args.seconds);
        sim.run_for(until);
        if let Some(updated) = watcher.poll_or_warn() {
            sim.reconfigure(&updated);
        }
    }

    let summary = sim.summary();
    info!(
        frames = summary.frames,
        ticks = summary.ticks,
        sim_seconds = summary.sim_seconds,
        position = ?summary.final_position,
        max_height = summary.max_height,
        distance = summary.distance_travelled,
        pickups = summary.pickups,
        releases = summary.releases,
        "Run complete"
    );
    Ok(())
}
