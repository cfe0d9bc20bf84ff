//! Headless Graviton runner.
//!
//! Builds the demo level, wires the player controller into a two-stage
//! bevy_ecs schedule, and replays a scripted input timeline at uneven frame
//! rates while physics ticks at a fixed rate.

pub mod game_loop;
pub mod scenario;
pub mod schedule;
pub mod sim;
pub mod watcher;

pub use game_loop::GameLoop;
pub use scenario::{Action, DemoScene, InputScript, ScriptEvent, build_demo_scene};
pub use schedule::{SimSchedule, SimSchedules, SimStats, build_sim_schedules};
pub use sim::{SimSummary, Simulation};
pub use watcher::ConfigWatcher;
