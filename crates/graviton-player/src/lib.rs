//! First-person locomotion and gravity-gun object manipulation.
//!
//! Everything here is engine-agnostic: physics is reached through
//! [`graviton_physics::PhysicsBackend`], so the same controller runs on the
//! Rapier backend in the app and on an in-memory fake in tests.

pub mod controller;
pub mod input;
pub mod look;
pub mod manipulator;
pub mod motion;
pub mod surface;

#[cfg(test)]
mod testing;

pub use controller::PlayerController;
pub use input::{InputFrame, QueuedIntents};
pub use look::{LookController, eye_position};
pub use manipulator::{HeldObject, ManipulatorState, ObjectManipulator, ReleaseCause};
pub use motion::{MotionIntegrator, PlayerMotionState};
pub use surface::{is_floor, project_on_plane};
