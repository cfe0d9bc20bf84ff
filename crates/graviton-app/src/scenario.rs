//! Demo level and the scripted input timeline that plays through it.

use glam::Vec3;
use graviton_config::Config;
use graviton_physics::scene::{spawn_fixed_box, spawn_floor, spawn_prop};
use graviton_physics::{PhysicsWorld, RapierBackend};
use graviton_player::InputFrame;
use rapier3d::prelude::RigidBodyHandle;

/// Half-size of every demo crate.
pub const PROP_HALF_SIZE: f32 = 0.25;

/// Handles of the dynamic props in the demo level.
#[derive(Debug, Clone, Default)]
pub struct DemoScene {
    pub props: Vec<RigidBodyHandle>,
}

/// Builds the demo level: a floor, a walkable ramp, a too-steep ramp, and a
/// row of crates straight ahead of the spawn point.
pub fn build_demo_scene(config: &Config) -> (RapierBackend, DemoScene) {
    let mut world = PhysicsWorld::new(config.physics.fixed_dt());
    world.set_gravity(config.physics.gravity);

    spawn_floor(&mut world, 50.0);
    spawn_fixed_box(
        &mut world,
        Vec3::new(8.0, 0.5, -4.0),
        Vec3::new(4.0, 0.2, 2.0),
        20.0_f32.to_radians(),
    );
    spawn_fixed_box(
        &mut world,
        Vec3::new(-8.0, 1.0, -4.0),
        Vec3::new(4.0, 0.2, 2.0),
        -60.0_f32.to_radians(),
    );

    let props = [-1.0, 0.0, 1.0]
        .into_iter()
        .map(|x| {
            let (body, _) = spawn_prop(
                &mut world,
                Vec3::new(x, PROP_HALF_SIZE, -2.5),
                PROP_HALF_SIZE,
            );
            body
        })
        .collect();

    let spawn_height = config.physics.capsule_half_height + config.physics.capsule_radius + 0.05;
    let backend = RapierBackend::new(
        world,
        Vec3::new(0.0, spawn_height, 0.0),
        config.physics.capsule_half_height,
        config.physics.capsule_radius,
    );
    (backend, DemoScene { props })
}

/// One scripted input change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Hold the movement axes at these values until the next `Walk`.
    Walk { forward: f32, strafe: f32 },
    /// One frame of mouse movement.
    Look { yaw: f32, pitch: f32 },
    Jump,
    Grab,
    Fling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptEvent {
    /// Seconds since the start of the run.
    pub at: f32,
    pub action: Action,
}

/// Time-ordered input events replayed against simulated frames.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    events: Vec<ScriptEvent>,
}

impl InputScript {
    pub fn new(mut events: Vec<ScriptEvent>) -> Self {
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { events }
    }

    /// Look down at the middle crate, pick it up, carry it while walking,
    /// throw it, then jump and strafe.
    pub fn demo() -> Self {
        use Action::*;
        let ev = |at, action| ScriptEvent { at, action };
        Self::new(vec![
            ev(0.5, Look { yaw: 0.0, pitch: -28.0 }),
            ev(1.0, Grab),
            ev(1.5, Look { yaw: 0.0, pitch: 28.0 }),
            ev(1.6, Walk { forward: 1.0, strafe: 0.0 }),
            ev(2.6, Walk { forward: 0.0, strafe: 0.0 }),
            ev(2.8, Look { yaw: 0.0, pitch: 15.0 }),
            ev(3.0, Fling),
            ev(3.5, Jump),
            ev(3.8, Look { yaw: 90.0, pitch: -15.0 }),
            ev(4.0, Walk { forward: 0.0, strafe: 1.0 }),
            ev(4.6, Jump),
            ev(5.2, Walk { forward: -1.0, strafe: 0.0 }),
            ev(5.8, Walk { forward: 0.0, strafe: 0.0 }),
        ])
    }

    pub fn events(&self) -> &[ScriptEvent] {
        &self.events
    }

    /// Input for the frame covering `(from, to]`.
    ///
    /// Axes come from the latest `Walk` at or before `to`. One-shot actions
    /// and look deltas fire for every event strictly after `from`.
    pub fn frame(&self, from: f32, to: f32) -> InputFrame {
        let mut frame = InputFrame::default();
        for event in self.events.iter().take_while(|e| e.at <= to) {
            let fresh = event.at > from;
            match event.action {
                Action::Walk { forward, strafe } => {
                    frame.forward_axis = forward;
                    frame.strafe_axis = strafe;
                }
                Action::Look { yaw, pitch } if fresh => {
                    frame.look_yaw += yaw;
                    frame.look_pitch += pitch;
                }
                Action::Jump if fresh => frame.jump = true,
                Action::Grab if fresh => frame.grab = true,
                Action::Fling if fresh => frame.fling = true,
                _ => {}
            }
        }
        frame
    }
}

/// Uneven frame times cycling through 60, 144, and 30 fps.
pub fn frame_times() -> impl Iterator<Item = f64> {
    [1.0 / 60.0, 1.0 / 144.0, 1.0 / 30.0].into_iter().cycle()
}
