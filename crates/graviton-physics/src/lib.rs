//! Physics integration: engine-facing traits and a Rapier 3D backend.
//!
//! The locomotion core never talks to Rapier directly. It sees the engine
//! through [`PhysicsBackend`] (character mover, pick raycast, object lookup)
//! and [`PhysicalObject`] (per-body property access). [`RapierBackend`]
//! implements both on top of a single [`PhysicsWorld`] that owns all
//! simulation state.

pub mod backend;
pub mod character;
pub mod object;
pub mod rapier_backend;
pub mod scene;

pub use backend::{Contact, PhysicsBackend, PickHit};
pub use character::{CharacterBody, spawn_character};
pub use object::{CollisionResponseMode, PhysicalObject, SavedPhysicalProperties};
pub use rapier_backend::RapierBackend;

use rapier3d::prelude::*;

/// Central physics simulation state owning all Rapier sets and pipelines.
pub struct PhysicsWorld {
    /// World-space gravity vector.
    pub gravity: Vector,
    /// Timestep and solver configuration.
    pub integration_parameters: IntegrationParameters,
    /// The main simulation pipeline.
    pub physics_pipeline: PhysicsPipeline,
    /// Tracks sleeping/awake body islands.
    pub island_manager: IslandManager,
    /// Broad-phase collision detection (also provides query pipeline).
    pub broad_phase: BroadPhaseBvh,
    /// Narrow-phase collision detection (contact manifolds).
    pub narrow_phase: NarrowPhase,
    /// All rigid bodies in the simulation.
    pub rigid_body_set: RigidBodySet,
    /// All colliders in the simulation.
    pub collider_set: ColliderSet,
    /// Impulse-based joints.
    pub impulse_joint_set: ImpulseJointSet,
    /// Multibody joints.
    pub multibody_joint_set: MultibodyJointSet,
    /// Continuous collision detection solver, used by held and flung props.
    pub ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// Creates a physics world with gravity `(0, -9.81, 0)` stepping at `dt` seconds.
    pub fn new(dt: f32) -> Self {
        let integration_parameters = IntegrationParameters {
            dt,
            ..Default::default()
        };

        Self {
            gravity: Vector::new(0.0, -9.81, 0.0),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Advances the simulation by one fixed timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Changes the length of one step.
    pub fn set_timestep(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Sets the world gravity vector.
    pub fn set_gravity(&mut self, gravity: glam::Vec3) {
        self.gravity = Vector::new(gravity.x, gravity.y, gravity.z);
    }

    /// Returns the current gravity.
    pub fn gravity(&self) -> glam::Vec3 {
        glam::Vec3::new(self.gravity.x, self.gravity.y, self.gravity.z)
    }

    /// Removes a body and its colliders, e.g. when a prop is despawned.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(1.0 / 50.0)
    }
}
