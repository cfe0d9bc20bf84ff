//! [`PhysicsBackend`] implementation over a Rapier [`PhysicsWorld`].

use bevy_ecs::prelude::*;
use glam::Vec3;
use rapier3d::prelude::*;

use crate::backend::{Contact, PhysicsBackend, PickHit};
use crate::character::{CharacterBody, spawn_character};
use crate::object::PhysicalObject;
use crate::PhysicsWorld;

/// The Rapier world together with the player's character body.
///
/// Inserted as an ECS resource by the runner; the fixed-step system hands it
/// to the player controller and then steps the world.
#[derive(Resource)]
pub struct RapierBackend {
    /// All simulation state.
    pub world: PhysicsWorld,
    /// The player's kinematic capsule.
    pub character: CharacterBody,
}

impl RapierBackend {
    /// Wraps `world` and spawns the character capsule at `spawn`.
    pub fn new(mut world: PhysicsWorld, spawn: Vec3, half_height: f32, radius: f32) -> Self {
        let character = spawn_character(&mut world, spawn, half_height, radius);
        Self { world, character }
    }

    /// Advances the Rapier simulation by one fixed step.
    pub fn step(&mut self) {
        self.world.step();
    }

    /// Resizes the character capsule. The next move lifts it out of the floor
    /// if it grew.
    pub fn resize_character(&mut self, half_height: f32, radius: f32) {
        self.character.resize(&mut self.world, half_height, radius);
    }

    /// World-space translation of a body, if it still exists.
    pub fn body_position(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.world
            .rigid_body_set
            .get(body)
            .map(|b| {
                let t = b.translation();
                Vec3::new(t.x, t.y, t.z)
            })
    }
}

impl PhysicsBackend for RapierBackend {
    type BodyId = RigidBodyHandle;
    type ColliderId = ColliderHandle;

    fn move_character(&mut self, displacement: Vec3, dt: f32) -> Vec<Contact<ColliderHandle>> {
        self.character.move_by(&mut self.world, displacement, dt)
    }

    fn character_position(&self) -> Vec3 {
        self.character.position()
    }

    fn cast_pick_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<PickHit<RigidBodyHandle, ColliderHandle>> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }

        // Only dynamic bodies are grabbable; this also skips the kinematic
        // character capsule and all fixed level geometry.
        let filter = QueryFilter::only_dynamic();
        let query_pipeline = self.world.broad_phase.as_query_pipeline(
            self.world.narrow_phase.query_dispatcher(),
            &self.world.rigid_body_set,
            &self.world.collider_set,
            filter,
        );

        let ray = Ray::new(
            Vector::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );
        // The query returns the closest hit.
        let (collider, distance) = query_pipeline.cast_ray(&ray, max_distance, true)?;
        if distance > max_distance {
            return None;
        }
        let body = self.world.collider_set.get(collider)?.parent()?;
        Some(PickHit {
            body,
            collider,
            distance,
        })
    }

    fn object_mut(&mut self, body: RigidBodyHandle) -> Option<&mut dyn PhysicalObject> {
        self.world
            .rigid_body_set
            .get_mut(body)
            .map(|b| b as &mut dyn PhysicalObject)
    }
}
