//! Player character body: kinematic capsule driven by Rapier's character controller.
//!
//! The controller only resolves collisions. Velocity integration, floor
//! classification, and jumping live in the locomotion core, which consumes
//! the contacts reported by [`CharacterBody::move_by`].

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;

use crate::PhysicsWorld;
use crate::backend::Contact;

/// How far below the capsule's bottom the floor probe reaches.
const GROUND_PROBE: f32 = 0.05;

/// Kinematic rigid body + capsule collider + collision-resolving controller.
pub struct CharacterBody {
    /// Handle to the kinematic rigid body in the physics world.
    pub body_handle: RigidBodyHandle,
    /// Handle to the capsule collider attached to the body.
    pub collider_handle: ColliderHandle,
    /// Rapier's character controller.
    pub controller: KinematicCharacterController,
    half_height: f32,
    radius: f32,
    // Tracks the kinematic target so reads between moves and the next
    // world step see where the character is going, not where it was.
    position: Vec3,
}

/// Spawns the character: kinematic body + capsule collider + controller.
pub fn spawn_character(
    physics: &mut PhysicsWorld,
    position: Vec3,
    half_height: f32,
    radius: f32,
) -> CharacterBody {
    let body = RigidBodyBuilder::kinematic_position_based()
        .translation(Vector::new(position.x, position.y, position.z))
        .build();
    let body_handle = physics.rigid_body_set.insert(body);

    let collider = ColliderBuilder::capsule_y(half_height, radius)
        .friction(0.0)
        .build();
    let collider_handle =
        physics
            .collider_set
            .insert_with_parent(collider, body_handle, &mut physics.rigid_body_set);

    // No snap-to-ground: the core relies on a small downward move every tick
    // to produce the floor contact.
    let controller = KinematicCharacterController {
        max_slope_climb_angle: std::f32::consts::FRAC_PI_4,
        min_slope_slide_angle: std::f32::consts::FRAC_PI_4,
        autostep: Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(0.3),
            min_width: CharacterLength::Absolute(0.3),
            include_dynamic_bodies: false,
        }),
        snap_to_ground: None,
        offset: CharacterLength::Absolute(0.01),
        ..Default::default()
    };

    CharacterBody {
        body_handle,
        collider_handle,
        controller,
        half_height,
        radius,
        position,
    }
}

impl CharacterBody {
    /// Position of the body origin after the most recent move.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Capsule `(half_height, radius)`.
    pub fn dimensions(&self) -> (f32, f32) {
        (self.half_height, self.radius)
    }

    /// Swaps the capsule collider for one of the given size.
    pub fn resize(&mut self, physics: &mut PhysicsWorld, half_height: f32, radius: f32) {
        if let Some(collider) = physics.collider_set.get_mut(self.collider_handle) {
            collider.set_shape(SharedShape::capsule_y(half_height, radius));
        }
        self.half_height = half_height;
        self.radius = radius;
    }

    /// Resolves one desired displacement against the world and schedules the
    /// corrected position as the body's next kinematic target.
    ///
    /// Every obstacle the shape cast touched is returned as a [`Contact`].
    /// Moves that do not rise also probe straight down from the capsule
    /// centre: a surface within reach of the capsule's bottom is reported as
    /// a contact, and a capsule that ended up inside it is lifted back out.
    pub fn move_by(
        &mut self,
        physics: &mut PhysicsWorld,
        displacement: Vec3,
        dt: f32,
    ) -> Vec<Contact<ColliderHandle>> {
        let desired = Vector::new(displacement.x, displacement.y, displacement.z);

        let filter = QueryFilter::new().exclude_rigid_body(self.body_handle);
        let query_pipeline = physics.broad_phase.as_query_pipeline(
            physics.narrow_phase.query_dispatcher(),
            &physics.rigid_body_set,
            &physics.collider_set,
            filter,
        );

        let shape = Capsule::new_y(self.half_height, self.radius);
        let body_pos = physics.rigid_body_set[self.body_handle].position();

        let mut contacts = Vec::new();
        let corrected = self.controller.move_shape(
            dt,
            &query_pipeline,
            &shape,
            body_pos,
            desired,
            |collision| {
                // normal1 is the character's outward normal; the surface
                // normal facing the character is its opposite.
                let n = collision.hit.normal1;
                contacts.push(Contact {
                    normal: Vec3::new(-n.x, -n.y, -n.z),
                    collider: collision.handle,
                });
            },
        );

        self.position += Vec3::new(
            corrected.translation.x,
            corrected.translation.y,
            corrected.translation.z,
        );

        // A move that starts inside the controller's offset can slip past the
        // floor without a collision event.
        let rest = self.half_height + self.radius;
        let ground = if displacement.y <= 0.0 {
            let ray = Ray::new(
                Vector::new(self.position.x, self.position.y, self.position.z),
                Vector::new(0.0, -1.0, 0.0),
            );
            query_pipeline.cast_ray_and_get_normal(&ray, rest + GROUND_PROBE, true)
        } else {
            None
        };
        if let Some((collider, hit)) = ground {
            if hit.time_of_impact < rest {
                self.position.y += rest - hit.time_of_impact;
            }
            if !contacts.iter().any(|c| c.collider == collider) {
                contacts.push(Contact {
                    normal: Vec3::new(hit.normal.x, hit.normal.y, hit.normal.z),
                    collider,
                });
            }
        }

        let target = Vector::new(self.position.x, self.position.y, self.position.z);
        physics.rigid_body_set[self.body_handle].set_next_kinematic_translation(target);

        tracing::trace!(
            contacts = contacts.len(),
            x = self.position.x,
            y = self.position.y,
            z = self.position.z,
            "character moved"
        );
        contacts
    }
}
