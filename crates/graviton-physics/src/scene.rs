//! Static level geometry and dynamic props for sandboxes and tests.

use glam::Vec3;
use rapier3d::prelude::*;

use crate::PhysicsWorld;

/// Adds a fixed floor slab whose top face is at `y = 0`.
pub fn spawn_floor(physics: &mut PhysicsWorld, half_extent: f32) -> ColliderHandle {
    spawn_fixed_box(
        physics,
        Vec3::new(0.0, -0.5, 0.0),
        Vec3::new(half_extent, 0.5, half_extent),
        0.0,
    )
}

/// Adds a fixed cuboid, optionally tilted about the Z axis by `tilt_radians`.
pub fn spawn_fixed_box(
    physics: &mut PhysicsWorld,
    center: Vec3,
    half_extents: Vec3,
    tilt_radians: f32,
) -> ColliderHandle {
    let body = RigidBodyBuilder::fixed()
        .translation(Vector::new(center.x, center.y, center.z))
        .rotation(Vector::new(0.0, 0.0, tilt_radians))
        .build();
    let handle = physics.rigid_body_set.insert(body);
    physics.collider_set.insert_with_parent(
        ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build(),
        handle,
        &mut physics.rigid_body_set,
    )
}

/// Adds a dynamic crate that the gravity gun can pick up.
pub fn spawn_prop(
    physics: &mut PhysicsWorld,
    center: Vec3,
    half_size: f32,
) -> (RigidBodyHandle, ColliderHandle) {
    let body = RigidBodyBuilder::dynamic()
        .translation(Vector::new(center.x, center.y, center.z))
        .build();
    let body_handle = physics.rigid_body_set.insert(body);
    let collider_handle = physics.collider_set.insert_with_parent(
        ColliderBuilder::cuboid(half_size, half_size, half_size)
            .density(1.0)
            .build(),
        body_handle,
        &mut physics.rigid_body_set,
    );
    (body_handle, collider_handle)
}
