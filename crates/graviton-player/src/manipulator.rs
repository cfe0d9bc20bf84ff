//! Gravity-gun object manipulator: pick up, carry, release, fling.
//!
//! A two-state machine. `Idle` has no data; `Holding` owns a [`HeldObject`]
//! recording which body is carried and the properties it had before the
//! grab. Every exit from `Holding` restores those properties verbatim,
//! except when the body has vanished from the engine, in which case the
//! record is simply dropped.

use glam::{Quat, Vec3};
use graviton_config::PlayerConfig;
use graviton_physics::{PhysicsBackend, SavedPhysicalProperties};
use tracing::{debug, warn};

/// Observable manipulator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManipulatorState {
    /// Nothing is held.
    Idle,
    /// An object is being carried.
    Holding,
}

/// The record that exists only while an object is held.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeldObject<B, C> {
    /// Engine body being carried. Borrowed for the duration of the hold.
    pub body: B,
    /// Collider of the carried body, for self-collision detection.
    pub collider: C,
    /// Properties to restore on release.
    pub saved: SavedPhysicalProperties,
}

/// Why a hold ended; used for logging and returned to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseCause {
    /// The grab input was pressed again.
    Dropped,
    /// The character's own move touched the carried object.
    SelfCollision,
    /// The object was thrown.
    Flung,
}

/// Gravity-gun state machine over a physics backend `P`.
pub struct ObjectManipulator<P: PhysicsBackend> {
    held: Option<HeldObject<P::BodyId, P::ColliderId>>,
    /// Reach of the pick-up ray.
    pub max_raycast_distance: f32,
    /// Impulse magnitude applied on fling.
    pub gravity_gun_force: f32,
    /// Carry distance in front of the eye.
    pub hold_distance: f32,
}

impl<P: PhysicsBackend> ObjectManipulator<P> {
    /// Creates an idle manipulator with tunables from `config`.
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            held: None,
            max_raycast_distance: config.maximum_raycast_distance,
            gravity_gun_force: config.gravity_gun_force,
            hold_distance: config.hold_distance,
        }
    }

    /// Current state.
    pub fn state(&self) -> ManipulatorState {
        if self.held.is_some() {
            ManipulatorState::Holding
        } else {
            ManipulatorState::Idle
        }
    }

    /// The held-object record, if any.
    pub fn held(&self) -> Option<&HeldObject<P::BodyId, P::ColliderId>> {
        self.held.as_ref()
    }

    /// Grab input edge: pick up when idle, drop when holding.
    pub fn toggle_grab(&mut self, physics: &mut P, eye: Vec3, aim: Vec3) {
        if self.held.is_some() {
            self.release(physics, ReleaseCause::Dropped);
        } else {
            self.try_pick_up(physics, eye, aim);
        }
    }

    /// Casts from `eye` along `aim`; on a hit, suspends the object and holds it.
    ///
    /// Returns whether something was picked up. A miss changes nothing.
    pub fn try_pick_up(&mut self, physics: &mut P, eye: Vec3, aim: Vec3) -> bool {
        if self.held.is_some() {
            return false;
        }
        let Some(hit) = physics.cast_pick_ray(eye, aim, self.max_raycast_distance) else {
            return false;
        };
        let Some(object) = physics.object_mut(hit.body) else {
            return false;
        };

        let saved = SavedPhysicalProperties::capture(object);
        SavedPhysicalProperties::suspend(object);
        self.held = Some(HeldObject {
            body: hit.body,
            collider: hit.collider,
            saved,
        });
        debug!(body = ?hit.body, distance = hit.distance, ?saved, "picked up object");
        true
    }

    /// Kinematically moves the held object to `eye + aim * hold_distance`.
    pub fn carry(&mut self, physics: &mut P, eye: Vec3, aim: Vec3) {
        let Some(held) = self.held else {
            return;
        };
        match physics.object_mut(held.body) {
            Some(object) => object.move_to(eye + aim * self.hold_distance, Quat::IDENTITY),
            None => self.forget_vanished(held.body),
        }
    }

    /// Restores the saved properties and returns to `Idle`.
    ///
    /// Returns the released record, or `None` if nothing was held.
    pub fn release(
        &mut self,
        physics: &mut P,
        cause: ReleaseCause,
    ) -> Option<HeldObject<P::BodyId, P::ColliderId>> {
        let held = self.held.take()?;
        match physics.object_mut(held.body) {
            Some(object) => {
                held.saved.apply_to(object);
                debug!(body = ?held.body, ?cause, "released object");
            }
            None => warn!(body = ?held.body, ?cause, "held object vanished before release"),
        }
        Some(held)
    }

    /// Throws the held object along `aim`, then releases it.
    ///
    /// The impulse is applied while the object is still in its held
    /// configuration; the restore comes strictly after.
    pub fn fling(
        &mut self,
        physics: &mut P,
        aim: Vec3,
    ) -> Option<HeldObject<P::BodyId, P::ColliderId>> {
        let held = self.held?;
        match physics.object_mut(held.body) {
            Some(object) => object.apply_impulse(aim * self.gravity_gun_force),
            None => {
                self.forget_vanished(held.body);
                return None;
            }
        }
        debug!(body = ?held.body, force = self.gravity_gun_force, "flung object");
        self.release(physics, ReleaseCause::Flung)
    }

    /// Auto-release when the character's own move touched the held collider.
    ///
    /// Returns whether a release happened.
    pub fn on_character_contact(&mut self, physics: &mut P, collider: P::ColliderId) -> bool {
        match self.held {
            Some(held) if held.collider == collider => {
                self.release(physics, ReleaseCause::SelfCollision);
                true
            }
            _ => false,
        }
    }

    fn forget_vanished(&mut self, body: P::BodyId) {
        warn!(?body, "held object vanished; dropping hold without restore");
        self.held = None;
    }
}
