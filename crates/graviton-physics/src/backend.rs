//! The narrow interface between the locomotion core and a physics engine.
//!
//! Identities are associated types so the core can hold on to whatever the
//! engine uses (Rapier handles in production, plain integers in tests).

use std::fmt::Debug;

use glam::Vec3;

use crate::object::PhysicalObject;

/// A contact reported by the character mover during one move request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact<C> {
    /// World-space surface normal at the contact, pointing toward the character.
    pub normal: Vec3,
    /// Identity of the collider that was hit.
    pub collider: C,
}

/// Result of a pick raycast against the dynamic-object category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit<B, C> {
    /// Body that owns the hit collider.
    pub body: B,
    /// Collider that the ray struck.
    pub collider: C,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
}

/// Everything the controller needs from the physics engine.
pub trait PhysicsBackend {
    /// Identity of a rigid body.
    type BodyId: Copy + Eq + Debug;
    /// Identity of a collider (contact surface).
    type ColliderId: Copy + Eq + Debug;

    /// Moves the character by `displacement`, resolving collisions.
    ///
    /// Returns every contact encountered during this move, in the order the
    /// engine resolved them.
    fn move_character(&mut self, displacement: Vec3, dt: f32) -> Vec<Contact<Self::ColliderId>>;

    /// Current world-space position of the character body origin.
    fn character_position(&self) -> Vec3;

    /// Casts a ray against dynamic objects only and returns the nearest hit
    /// no further than `max_distance` (inclusive).
    fn cast_pick_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<PickHit<Self::BodyId, Self::ColliderId>>;

    /// Looks up a live body. `None` once the body has been destroyed.
    fn object_mut(&mut self, body: Self::BodyId) -> Option<&mut dyn PhysicalObject>;
}
