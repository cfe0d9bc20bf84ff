//! Headless simulation: the demo level, the player, and the schedules in one
//! bevy_ecs world, advanced frame by frame from a scripted timeline.

use bevy_ecs::prelude::*;
use glam::Vec3;
use graviton_config::Config;
use graviton_physics::RapierBackend;
use graviton_player::PlayerController;
use tracing::info;

use crate::scenario::{DemoScene, InputScript, build_demo_scene, frame_times};
use crate::schedule::{
    CurrentInput, FixedDelta, Player, SimSchedules, SimStats, build_sim_schedules,
};

/// What a run produced, for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct SimSummary {
    pub frames: u64,
    pub ticks: u64,
    pub sim_seconds: f64,
    pub final_position: Vec3,
    pub max_height: f32,
    pub distance_travelled: f32,
    pub pickups: u32,
    pub releases: u32,
}

pub struct Simulation {
    world: World,
    schedules: SimSchedules,
    script: InputScript,
    scene: DemoScene,
    clock: f32,
}

impl Simulation {
    /// Builds the demo level and inserts every resource the systems need.
    pub fn new(config: &Config, script: InputScript) -> Self {
        let (backend, scene) = build_demo_scene(config);
        let player = PlayerController::new(config, &backend);
        let fixed_dt = config.physics.fixed_dt();

        let mut world = World::new();
        world.insert_resource(backend);
        world.insert_resource(Player(player));
        world.insert_resource(CurrentInput::default());
        world.insert_resource(FixedDelta(fixed_dt));
        world.insert_resource(SimStats::default());

        let mut schedules = build_sim_schedules(f64::from(fixed_dt));
        schedules.initialize_all(&mut world);

        Self {
            world,
            schedules,
            script,
            scene,
            clock: 0.0,
        }
    }

    /// Advances one rendered frame of `frame_dt` seconds. Returns the number
    /// of physics ticks it ran.
    pub fn frame(&mut self, frame_dt: f64) -> u32 {
        let from = self.clock;
        let to = from + frame_dt as f32;
        self.world.resource_mut::<CurrentInput>().0 = self.script.frame(from, to);
        self.clock = to;
        self.schedules.run(&mut self.world, frame_dt)
    }

    /// Runs uneven frames until `seconds` of script time have elapsed.
    pub fn run_for(&mut self, seconds: f32) -> SimSummary {
        for dt in frame_times() {
            if self.clock >= seconds {
                break;
            }
            self.frame(dt);
        }
        self.summary()
    }

    /// Pushes new tunables to the player, the tick rate, and the Rapier world.
    pub fn reconfigure(&mut self, config: &Config) {
        let physics = &config.physics;
        let fixed_dt = physics.fixed_dt();

        self.world.resource_mut::<Player>().0.reconfigure(config);
        self.world.resource_mut::<FixedDelta>().0 = fixed_dt;
        self.schedules.set_fixed_dt(f64::from(fixed_dt));

        let mut backend = self.world.resource_mut::<RapierBackend>();
        backend.world.set_timestep(fixed_dt);
        backend.world.set_gravity(physics.gravity);
        backend.resize_character(physics.capsule_half_height, physics.capsule_radius);

        info!(
            fixed_hz = physics.fixed_hz,
            gravity = ?physics.gravity,
            "Applied reloaded config"
        );
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn player(&self) -> &PlayerController<RapierBackend> {
        &self.world.resource::<Player>().0
    }

    pub fn backend(&self) -> &RapierBackend {
        self.world.resource::<RapierBackend>()
    }

    pub fn scene(&self) -> &DemoScene {
        &self.scene
    }

    pub fn stats(&self) -> &SimStats {
        self.world.resource::<SimStats>()
    }

    pub fn summary(&self) -> SimSummary {
        let stats = self.stats();
        let game_loop = self.schedules.game_loop();
        SimSummary {
            frames: game_loop.frame_count(),
            ticks: stats.ticks,
            sim_seconds: game_loop.total_sim_time(),
            final_position: self.player().position(),
            max_height: stats.max_height,
            distance_travelled: stats.distance_travelled,
            pickups: stats.pickups,
            releases: stats.releases,
        }
    }
}
