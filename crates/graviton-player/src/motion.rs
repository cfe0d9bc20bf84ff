//! Per-tick velocity integration for the player body.
//!
//! One physics tick is split into three calls so the caller can route the
//! mover's contacts in between:
//!
//! 1. [`MotionIntegrator::begin_tick`] accumulates gravity, adds walk input,
//!    and returns the displacement to request from the mover.
//! 2. [`MotionIntegrator::on_contact`] once per contact reported by the mover.
//! 3. [`MotionIntegrator::end_tick`] resolves the queued jump, clears the
//!    per-tick flags, and damps horizontal velocity.
//!
//! [`MotionIntegrator::tick`] runs all three against a closure mover.

use glam::Vec3;
use graviton_config::PlayerConfig;

use crate::surface::{is_floor, project_on_plane};

/// Mutable locomotion state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerMotionState {
    /// World-space velocity.
    pub velocity: Vec3,
    /// Whether a floor contact was seen during the current tick.
    pub is_on_floor: bool,
    /// Jump requested since the last physics tick.
    pub queued_jump: bool,
}

/// Owns the player velocity and advances it once per fixed tick.
#[derive(Clone, Debug)]
pub struct MotionIntegrator {
    /// Tunables; read every tick so hot-reloaded values apply immediately.
    pub config: PlayerConfig,
    /// Current state.
    pub state: PlayerMotionState,
}

impl MotionIntegrator {
    /// Creates an integrator at rest.
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            state: PlayerMotionState::default(),
        }
    }

    /// Current velocity.
    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    /// Whether the current tick has seen a floor contact.
    pub fn is_on_floor(&self) -> bool {
        self.state.is_on_floor
    }

    /// Latches a jump request until the next tick consumes it.
    pub fn queue_jump(&mut self) {
        self.state.queued_jump = true;
    }

    /// Gravity and walk input. Returns the displacement `velocity * dt`.
    pub fn begin_tick(
        &mut self,
        dt: f32,
        look_forward: Vec3,
        look_right: Vec3,
        forward_axis: f32,
        strafe_axis: f32,
    ) -> Vec3 {
        let cfg = &self.config;
        let v = &mut self.state.velocity;

        // Checked before subtracting: one tick may overshoot terminal by up
        // to `fall_rate`. Keeping a small downward motion every tick is also
        // what produces the floor contact while standing still.
        if v.y > -cfg.absolute_terminal_velocity {
            v.y -= cfg.fall_rate;
        }

        let direction = (look_forward * forward_axis + look_right * strafe_axis).normalize_or_zero();
        *v += direction * cfg.walk_speed * dt;

        *v * dt
    }

    /// Consumes one contact from this tick's move.
    ///
    /// Every contact projects the velocity onto the contact plane; only
    /// contacts within the floor angle mark the player grounded.
    pub fn on_contact(&mut self, normal: Vec3) {
        if is_floor(
            normal,
            self.config.floor_normal,
            self.config.maximum_floor_angle_degrees,
        ) {
            self.state.is_on_floor = true;
        }
        self.state.velocity = project_on_plane(self.state.velocity, normal);
    }

    /// Jump resolution, per-tick flag reset, and horizontal damping.
    pub fn end_tick(&mut self, dt: f32) {
        let s = &mut self.state;
        if s.queued_jump && s.is_on_floor {
            s.velocity.y = self.config.jump_strength;
        }

        s.queued_jump = false;
        s.is_on_floor = false;

        let t = (self.config.deceleration_rate * dt).clamp(0.0, 1.0);
        s.velocity.x = lerp(s.velocity.x, 0.0, t);
        s.velocity.z = lerp(s.velocity.z, 0.0, t);
    }

    /// Runs a whole tick. `mover` receives the displacement and returns the
    /// normals of every contact it produced.
    pub fn tick(
        &mut self,
        dt: f32,
        look_forward: Vec3,
        look_right: Vec3,
        forward_axis: f32,
        strafe_axis: f32,
        mover: impl FnOnce(Vec3) -> Vec<Vec3>,
    ) {
        let displacement = self.begin_tick(dt, look_forward, look_right, forward_axis, strafe_axis);
        for normal in mover(displacement) {
            self.on_contact(normal);
        }
        self.end_tick(dt);
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
