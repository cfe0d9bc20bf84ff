//! First-person controller: look, locomotion, and the gravity gun wired
//! into the two-rate schedule.
//!
//! [`PlayerController::input_phase`] runs once per rendered frame. It turns
//! the look pivots and queues edge-triggered intents. Nothing else changes.
//!
//! [`PlayerController::physics_phase`] runs once per fixed tick and is the
//! only place motion and manipulator state are mutated. Each tick, in order:
//!
//! 1. queued grab toggle, then queued fling
//! 2. gravity and walk input, then the character move
//! 3. every contact from that move: floor test, plane projection, and the
//!    self-collision check against the held object
//! 4. jump, floor flag reset, damping
//! 5. carry the held object to the new hold point

use glam::Vec3;
use graviton_config::Config;
use graviton_physics::PhysicsBackend;
use tracing::debug;

use crate::input::{InputFrame, QueuedIntents};
use crate::look::{LookController, eye_position};
use crate::manipulator::{ManipulatorState, ObjectManipulator};
use crate::motion::MotionIntegrator;

pub struct PlayerController<P: PhysicsBackend> {
    look: LookController,
    motion: MotionIntegrator,
    manipulator: ObjectManipulator<P>,
    intents: QueuedIntents,
    forward_axis: f32,
    strafe_axis: f32,
    eye_height: f32,
    position: Vec3,
}

impl<P: PhysicsBackend> PlayerController<P> {
    /// Creates a controller standing wherever `physics` placed the character.
    pub fn new(config: &Config, physics: &P) -> Self {
        Self {
            look: LookController::from_config(&config.look),
            motion: MotionIntegrator::new(config.player.clone()),
            manipulator: ObjectManipulator::new(&config.player),
            intents: QueuedIntents::default(),
            forward_axis: 0.0,
            strafe_axis: 0.0,
            eye_height: config.player.eye_height,
            position: physics.character_position(),
        }
    }

    /// Applies new tunables without touching runtime state.
    pub fn reconfigure(&mut self, config: &Config) {
        self.motion.config = config.player.clone();
        self.manipulator.max_raycast_distance = config.player.maximum_raycast_distance;
        self.manipulator.gravity_gun_force = config.player.gravity_gun_force;
        self.manipulator.hold_distance = config.player.hold_distance;
        self.look.sensitivity = config.look.sensitivity;
        self.look.pitch_limit = config.look.pitch_limit_degrees.map(f32::to_radians);
        self.eye_height = config.player.eye_height;
    }

    /// Variable-rate pass: rotate pivots, sample axes, queue intents.
    pub fn input_phase(&mut self, frame: &InputFrame) {
        self.look.apply_look(frame.look_yaw, frame.look_pitch);
        self.forward_axis = frame.forward_axis;
        self.strafe_axis = frame.strafe_axis;
        if frame.jump {
            self.motion.queue_jump();
        }
        self.intents.record(frame);
    }

    /// Fixed-rate pass. Consumes every queued intent exactly once.
    pub fn physics_phase(&mut self, physics: &mut P, dt: f32) {
        let intents = self.intents.take();
        let aim = self.look.aim_forward();

        if intents.grab {
            let eye = self.eye_position();
            self.manipulator.toggle_grab(physics, eye, aim);
        }
        if intents.fling {
            self.manipulator.fling(physics, aim);
        }

        let displacement = self.motion.begin_tick(
            dt,
            self.look.forward(),
            self.look.right(),
            self.forward_axis,
            self.strafe_axis,
        );
        for contact in physics.move_character(displacement, dt) {
            self.motion.on_contact(contact.normal);
            if self.manipulator.on_character_contact(physics, contact.collider) {
                debug!(collider = ?contact.collider, "auto-released held object on self-collision");
            }
        }
        self.motion.end_tick(dt);

        self.position = physics.character_position();
        let eye = self.eye_position();
        self.manipulator.carry(physics, eye, aim);
    }

    /// World position of the character body, as of the last physics tick.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// World position of the inner pivot.
    pub fn eye_position(&self) -> Vec3 {
        eye_position(self.position, self.eye_height)
    }

    pub fn velocity(&self) -> Vec3 {
        self.motion.velocity()
    }

    pub fn manipulator_state(&self) -> ManipulatorState {
        self.manipulator.state()
    }

    pub fn look(&self) -> &LookController {
        &self.look
    }

    pub fn motion(&self) -> &MotionIntegrator {
        &self.motion
    }

    pub fn manipulator(&self) -> &ObjectManipulator<P> {
        &self.manipulator
    }

    /// Intents queued since the last physics tick.
    pub fn queued_intents(&self) -> QueuedIntents {
        self.intents
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
