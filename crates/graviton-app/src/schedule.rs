//! The two-rate schedule: a per-frame input stage and a fixed physics stage.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{IntoSystemConfigs, ScheduleLabel};
use glam::Vec3;
use graviton_physics::RapierBackend;
use graviton_player::{InputFrame, ManipulatorState, PlayerController};
use tracing::debug;

use crate::game_loop::GameLoop;

/// Execution stages, in the order they run each frame.
#[derive(ScheduleLabel, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSchedule {
    /// Once per frame: sample input, turn the view, queue intents.
    Input,
    /// Zero or more times per frame at the fixed rate: everything else.
    FixedPhysics,
}

/// The player controller bound to the Rapier backend.
#[derive(Resource)]
pub struct Player(pub PlayerController<RapierBackend>);

/// Input sampled for the current frame.
#[derive(Resource, Default)]
pub struct CurrentInput(pub InputFrame);

/// Length of one physics tick in seconds.
#[derive(Resource, Clone, Copy)]
pub struct FixedDelta(pub f32);

/// Running totals for the end-of-run summary.
#[derive(Resource, Debug, Default, Clone)]
pub struct SimStats {
    pub ticks: u64,
    pub pickups: u32,
    pub releases: u32,
    pub max_height: f32,
    pub distance_travelled: f32,
    last_position: Option<Vec3>,
    last_state: Option<ManipulatorState>,
}

/// Ordered pair of schedules plus the fixed-step accumulator.
pub struct SimSchedules {
    input: Schedule,
    fixed: Schedule,
    game_loop: GameLoop,
}

impl SimSchedules {
    /// Empty schedules ticking physics every `fixed_dt` seconds.
    pub fn new(fixed_dt: f64) -> Self {
        Self {
            input: Schedule::new(SimSchedule::Input),
            fixed: Schedule::new(SimSchedule::FixedPhysics),
            game_loop: GameLoop::new(fixed_dt),
        }
    }

    /// Register a system (or system tuple) into a stage.
    pub fn add_system<M>(&mut self, stage: SimSchedule, system: impl IntoSystemConfigs<M>) {
        self.schedule_mut(stage).add_systems(system);
    }

    pub fn schedule_mut(&mut self, stage: SimSchedule) -> &mut Schedule {
        match stage {
            SimSchedule::Input => &mut self.input,
            SimSchedule::FixedPhysics => &mut self.fixed,
        }
    }

    /// Runs one frame: the input stage once, then as many fixed ticks as the
    /// accumulated time allows. Returns the number of fixed ticks.
    pub fn run(&mut self, world: &mut World, frame_dt: f64) -> u32 {
        self.input.run(world);
        let fixed = &mut self.fixed;
        self.game_loop.tick(frame_dt, |_, _| fixed.run(world))
    }

    pub fn game_loop(&self) -> &GameLoop {
        &self.game_loop
    }

    /// Changes how often the physics stage runs.
    pub fn set_fixed_dt(&mut self, fixed_dt: f64) {
        self.game_loop.set_fixed_dt(fixed_dt);
    }

    /// Force-initialize both schedules, validating the dependency graph.
    pub fn initialize_all(&mut self, world: &mut World) {
        let _ = self.input.initialize(world);
        let _ = self.fixed.initialize(world);
    }
}

/// Builds the schedules with every simulation system registered.
pub fn build_sim_schedules(fixed_dt: f64) -> SimSchedules {
    let mut schedules = SimSchedules::new(fixed_dt);
    schedules.add_system(SimSchedule::Input, player_input_system);
    schedules.add_system(
        SimSchedule::FixedPhysics,
        (player_physics_system, world_step_system, record_stats_system).chain(),
    );
    schedules
}

/// Feeds the current frame's input to the controller.
pub fn player_input_system(input: Res<CurrentInput>, mut player: ResMut<Player>) {
    player.0.input_phase(&input.0);
}

/// Consumes queued intents, moves the character, carries the held object.
pub fn player_physics_system(
    dt: Res<FixedDelta>,
    mut player: ResMut<Player>,
    mut backend: ResMut<RapierBackend>,
) {
    player.0.physics_phase(&mut backend, dt.0);
}

/// Steps the Rapier world after the controller has issued its moves.
pub fn world_step_system(mut backend: ResMut<RapierBackend>) {
    backend.step();
}

/// Reads the player's position and grab state, the only values observers see.
pub fn record_stats_system(player: Res<Player>, mut stats: ResMut<SimStats>) {
    let position = player.0.position();
    let state = player.0.manipulator_state();

    stats.ticks += 1;
    if let Some(last) = stats.last_position {
        stats.distance_travelled += (position - last).length();
    }
    stats.max_height = if stats.last_position.is_some() {
        stats.max_height.max(position.y)
    } else {
        position.y
    };
    stats.last_position = Some(position);

    match (stats.last_state, state) {
        (Some(ManipulatorState::Idle) | None, ManipulatorState::Holding) => {
            stats.pickups += 1;
            debug!(tick = stats.ticks, "holding");
        }
        (Some(ManipulatorState::Holding), ManipulatorState::Idle) => {
            stats.releases += 1;
            debug!(tick = stats.ticks, "released");
        }
        _ => {}
    }
    stats.last_state = Some(state);
}
