//! Physics module
//!
//! `PhysicsSpace` drives a `PhysicsBackend` (rapier by default) at a fixed
//! timestep and keeps collidable entities in sync with their bodies.

mod backend;
mod rapier_backend;
mod shape;
mod space;

pub use backend::{BodyHandle, PhysicsBackend, WorldTransform};
pub use rapier_backend::RapierBackend;
pub use shape::{BodyType, CollisionShape, RigidBodyDesc, MIN_HULL_POINTS};
pub use space::PhysicsSpace;
