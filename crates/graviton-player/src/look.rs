//! Mouse look: two decoupled pivots expressed as a yaw and a pitch angle.
//!
//! The outer pivot turns about world up and supplies the horizontal basis
//! used for walking. The inner pivot adds pitch on top and supplies the aim
//! direction used for picking up, carrying, and flinging objects.

use glam::{Quat, Vec3};
use graviton_config::LookConfig;

/// Yaw/pitch look state.
#[derive(Clone, Debug, PartialEq)]
pub struct LookController {
    /// Outer pivot rotation about world up, in radians. Positive turns right.
    /// Unbounded; wraps naturally through the trigonometry.
    pub yaw: f32,
    /// Inner pivot rotation about its local lateral axis, in radians.
    /// Positive looks up.
    pub pitch: f32,
    /// Degrees of rotation per unit of mouse delta.
    pub sensitivity: f32,
    /// Optional clamp on `|pitch|`, in radians.
    pub pitch_limit: Option<f32>,
}

impl Default for LookController {
    fn default() -> Self {
        Self::from_config(&LookConfig::default())
    }
}

impl LookController {
    /// Creates a look controller facing `-Z` with settings from `config`.
    pub fn from_config(config: &LookConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: config.sensitivity,
            pitch_limit: config.pitch_limit_degrees.map(f32::to_radians),
        }
    }

    /// Rotates the outer pivot by `yaw_delta` and the inner pivot by
    /// `pitch_delta`, both raw mouse units scaled by the sensitivity (degrees).
    pub fn apply_look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += (yaw_delta * self.sensitivity).to_radians();
        self.pitch += (pitch_delta * self.sensitivity).to_radians();
        if let Some(limit) = self.pitch_limit {
            self.pitch = self.pitch.clamp(-limit, limit);
        }
    }

    /// Rotation of the outer pivot (yaw only).
    #[must_use]
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw)
    }

    /// Combined rotation of the inner pivot (yaw, then pitch).
    #[must_use]
    pub fn aim_rotation(&self) -> Quat {
        self.body_rotation() * Quat::from_rotation_x(self.pitch)
    }

    /// Horizontal forward direction for movement.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.body_rotation() * Vec3::NEG_Z
    }

    /// Horizontal right direction for movement.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.body_rotation() * Vec3::X
    }

    /// Direction the inner pivot looks along.
    #[must_use]
    pub fn aim_forward(&self) -> Vec3 {
        self.aim_rotation() * Vec3::NEG_Z
    }
}

/// World-space position of the inner pivot for a body at `body_position`.
#[must_use]
pub fn eye_position(body_position: Vec3, eye_height: f32) -> Vec3 {
    body_position + Vec3::Y * eye_height
}
