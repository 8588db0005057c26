/// Rigid-body world seam
///
/// The engine only needs to add and remove bodies, step the world and read
/// or overwrite a body's world transform. Everything else (broad phase,
/// contact solving) stays inside the backend.

use glam::{Quat, Vec3};
use slotmap::new_key_type;
use crate::error::Result;
use super::shape::RigidBodyDesc;

new_key_type! {
    /// Backend-independent body key
    pub struct BodyHandle;
}

/// Position and orientation of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl WorldTransform {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self { position: Vec3::ZERO, rotation: Quat::IDENTITY }
    }
}

pub trait PhysicsBackend {
    /// Register a body at `transform`. `desc` has already been validated.
    fn add_rigid_body(&mut self, desc: &RigidBodyDesc, transform: WorldTransform) -> Result<BodyHandle>;

    /// Remove a body and its collider. Returns false for an unknown handle.
    fn remove_rigid_body(&mut self, body: BodyHandle) -> bool;

    /// Advance by `dt` seconds using fixed internal steps
    ///
    /// At most `max_sub_steps` internal steps are taken; the remainder is
    /// carried to the next call. Returns the number of steps taken.
    fn step_simulation(&mut self, dt: f32, max_sub_steps: u32) -> u32;

    fn world_transform(&self, body: BodyHandle) -> Option<WorldTransform>;

    /// Teleport a body. Returns false for an unknown handle.
    fn set_world_transform(&mut self, body: BodyHandle, transform: WorldTransform) -> bool;

    fn body_count(&self) -> usize;
}
