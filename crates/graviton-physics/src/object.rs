//! Per-body physical properties that the gravity gun suspends and restores.

use glam::{Quat, Vec3};
use rapier3d::prelude::*;

/// How the engine resolves collisions for a body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollisionResponseMode {
    /// Contacts are detected at the end of each step only.
    #[default]
    Discrete,
    /// Swept detection; fast or teleported bodies cannot tunnel.
    Continuous,
}

/// Property access on a single engine body.
pub trait PhysicalObject {
    /// Current collision-response mode.
    fn collision_response_mode(&self) -> CollisionResponseMode;
    /// Sets the collision-response mode.
    fn set_collision_response_mode(&mut self, mode: CollisionResponseMode);
    /// Whether world gravity currently acts on the body.
    fn gravity_enabled(&self) -> bool;
    /// Enables or disables world gravity for the body.
    fn set_gravity_enabled(&mut self, enabled: bool);
    /// Raw gravity multiplier. Engines with only an on/off switch report 1 or 0.
    fn gravity_scale(&self) -> f32 {
        if self.gravity_enabled() { 1.0 } else { 0.0 }
    }
    /// Writes back a multiplier read from [`gravity_scale`](Self::gravity_scale).
    fn set_gravity_scale(&mut self, scale: f32) {
        self.set_gravity_enabled(scale != 0.0);
    }
    /// Teleports the body to a pose. Velocities are cleared.
    fn move_to(&mut self, position: Vec3, rotation: Quat);
    /// Adds an instantaneous change in momentum.
    fn apply_impulse(&mut self, impulse: Vec3);
}

/// Snapshot of the properties a grab overrides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SavedPhysicalProperties {
    /// Collision-response mode before the grab.
    pub collision_response_mode: CollisionResponseMode,
    /// Gravity multiplier before the grab. Zero means gravity was off.
    pub gravity_scale: f32,
}

impl SavedPhysicalProperties {
    /// Mode forced on a body for as long as it is held.
    pub const HELD_MODE: CollisionResponseMode = CollisionResponseMode::Continuous;

    /// Reads the current properties of `object`.
    pub fn capture(object: &dyn PhysicalObject) -> Self {
        Self {
            collision_response_mode: object.collision_response_mode(),
            gravity_scale: object.gravity_scale(),
        }
    }

    /// Whether gravity acted on the body before the grab.
    pub fn gravity_enabled(&self) -> bool {
        self.gravity_scale != 0.0
    }

    /// Writes this snapshot back verbatim.
    pub fn apply_to(&self, object: &mut dyn PhysicalObject) {
        object.set_collision_response_mode(self.collision_response_mode);
        object.set_gravity_scale(self.gravity_scale);
    }

    /// Puts `object` into the held configuration: no gravity, swept collisions.
    pub fn suspend(object: &mut dyn PhysicalObject) {
        object.set_collision_response_mode(Self::HELD_MODE);
        object.set_gravity_enabled(false);
    }
}

// Collision-response mode maps onto Rapier's CCD flag; gravity onto the
// gravity scale (0 disables). Snapshots carry the raw scale.
impl PhysicalObject for RigidBody {
    fn collision_response_mode(&self) -> CollisionResponseMode {
        if self.is_ccd_enabled() {
            CollisionResponseMode::Continuous
        } else {
            CollisionResponseMode::Discrete
        }
    }

    fn set_collision_response_mode(&mut self, mode: CollisionResponseMode) {
        self.enable_ccd(mode == CollisionResponseMode::Continuous);
    }

    fn gravity_enabled(&self) -> bool {
        RigidBody::gravity_scale(self) != 0.0
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        RigidBody::set_gravity_scale(self, if enabled { 1.0 } else { 0.0 }, true);
    }

    fn gravity_scale(&self) -> f32 {
        RigidBody::gravity_scale(self)
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        RigidBody::set_gravity_scale(self, scale, true);
    }

    fn move_to(&mut self, position: Vec3, rotation: Quat) {
        self.set_translation(Vector::new(position.x, position.y, position.z), true);
        self.set_rotation(
            rapier3d::math::Rotation::from_xyzw(rotation.x, rotation.y, rotation.z, rotation.w),
            true,
        );
        self.set_linvel(Vector::new(0.0, 0.0, 0.0), true);
        self.set_angvel(Vector::new(0.0, 0.0, 0.0), true);
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        RigidBody::apply_impulse(self, Vector::new(impulse.x, impulse.y, impulse.z), true);
    }
}
