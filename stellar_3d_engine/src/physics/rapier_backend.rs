/// Rapier world behind `PhysicsBackend`
///
/// The solver always advances by the configured fixed step. Elapsed time
/// passed to `step_simulation` is accumulated and consumed one fixed step at
/// a time, up to the sub-step bound.

use glam::{Quat, Vec3};
use rapier3d::na::{Quaternion, UnitQuaternion};
use rapier3d::prelude as rapier;
use slotmap::SlotMap;
use crate::config::PhysicsConfig;
use crate::error::{Error, Result};
use crate::engine_trace;
use super::backend::{BodyHandle, PhysicsBackend, WorldTransform};
use super::shape::{BodyType, CollisionShape, RigidBodyDesc};

pub struct RapierBackend {
    pipeline: rapier::PhysicsPipeline,
    gravity: rapier::Vector<f32>,
    integration_params: rapier::IntegrationParameters,
    islands: rapier::IslandManager,
    broad_phase: rapier::DefaultBroadPhase,
    narrow_phase: rapier::NarrowPhase,
    impulse_joints: rapier::ImpulseJointSet,
    multibody_joints: rapier::MultibodyJointSet,
    ccd_solver: rapier::CCDSolver,
    bodies: rapier::RigidBodySet,
    colliders: rapier::ColliderSet,
    handles: SlotMap<BodyHandle, rapier::RigidBodyHandle>,
    fixed_timestep: f32,
    accumulated_time: f32,
}

impl RapierBackend {
    pub fn new(config: &PhysicsConfig) -> Self {
        let mut integration_params = rapier::IntegrationParameters::default();
        integration_params.dt = config.fixed_timestep;

        Self {
            pipeline: rapier::PhysicsPipeline::new(),
            gravity: rapier::Vector::new(config.gravity.x, config.gravity.y, config.gravity.z),
            integration_params,
            islands: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            impulse_joints: rapier::ImpulseJointSet::new(),
            multibody_joints: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            handles: SlotMap::with_key(),
            fixed_timestep: config.fixed_timestep,
            accumulated_time: 0.0,
        }
    }

    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    /// Time carried over to the next call
    pub fn accumulated_time(&self) -> f32 {
        self.accumulated_time
    }

    fn step_internal(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }
}

fn to_isometry(transform: &WorldTransform) -> rapier::Isometry<f32> {
    let p = transform.position;
    let r = transform.rotation;
    rapier::Isometry::from_parts(
        rapier::Translation::new(p.x, p.y, p.z),
        UnitQuaternion::from_quaternion(Quaternion::new(r.w, r.x, r.y, r.z)),
    )
}

fn to_shared_shape(shape: &CollisionShape) -> Result<rapier::SharedShape> {
    Ok(match shape {
        CollisionShape::Cuboid { half_extents: h } => rapier::SharedShape::cuboid(h.x, h.y, h.z),
        CollisionShape::Ball { radius } => rapier::SharedShape::ball(*radius),
        CollisionShape::Capsule { half_height, radius } => {
            rapier::SharedShape::capsule_y(*half_height, *radius)
        }
        CollisionShape::ConvexHull { points } => {
            let points: Vec<_> = points.iter().map(|p| rapier::Point::new(p.x, p.y, p.z)).collect();
            rapier::SharedShape::convex_hull(&points).ok_or_else(|| {
                Error::Physics(format!("Degenerate convex hull ({} points)", points.len()))
            })?
        }
    })
}

impl From<BodyType> for rapier::RigidBodyType {
    fn from(body_type: BodyType) -> Self {
        match body_type {
            BodyType::Dynamic => rapier::RigidBodyType::Dynamic,
            BodyType::Fixed => rapier::RigidBodyType::Fixed,
            BodyType::Kinematic => rapier::RigidBodyType::KinematicPositionBased,
        }
    }
}

impl PhysicsBackend for RapierBackend {
    fn add_rigid_body(&mut self, desc: &RigidBodyDesc, transform: WorldTransform) -> Result<BodyHandle> {
        // Build the shape first so a degenerate hull leaves the world untouched
        let shape = to_shared_shape(&desc.shape)?;

        let body = rapier::RigidBodyBuilder::new(desc.body_type.into())
            .position(to_isometry(&transform));
        let rapier_handle = self.bodies.insert(body);

        let collider = rapier::ColliderBuilder::new(shape)
            .friction(desc.friction)
            .restitution(desc.restitution)
            .density(desc.density);
        self.colliders.insert_with_parent(collider, rapier_handle, &mut self.bodies);

        Ok(self.handles.insert(rapier_handle))
    }

    fn remove_rigid_body(&mut self, body: BodyHandle) -> bool {
        let Some(rapier_handle) = self.handles.remove(body) else {
            return false;
        };
        // Removing the body also removes its attached colliders
        self.bodies.remove(
            rapier_handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        ).is_some()
    }

    fn step_simulation(&mut self, dt: f32, max_sub_steps: u32) -> u32 {
        self.accumulated_time += dt;

        let mut steps = 0;
        while self.accumulated_time >= self.fixed_timestep && steps < max_sub_steps {
            self.step_internal();
            self.accumulated_time -= self.fixed_timestep;
            steps += 1;
        }

        if self.accumulated_time >= self.fixed_timestep {
            // Backlog past the sub-step bound is dropped, not replayed later
            engine_trace!("stellar3d::RapierBackend",
                "Dropping {:.4}s of simulation backlog", self.accumulated_time);
            self.accumulated_time %= self.fixed_timestep;
        }

        steps
    }

    fn world_transform(&self, body: BodyHandle) -> Option<WorldTransform> {
        let rapier_handle = self.handles.get(body)?;
        let b = self.bodies.get(*rapier_handle)?;
        let t = b.translation();
        let r = b.rotation();
        Some(WorldTransform {
            position: Vec3::new(t.x, t.y, t.z),
            rotation: Quat::from_xyzw(r.i, r.j, r.k, r.w),
        })
    }

    fn set_world_transform(&mut self, body: BodyHandle, transform: WorldTransform) -> bool {
        let Some(rapier_handle) = self.handles.get(body) else {
            return false;
        };
        match self.bodies.get_mut(*rapier_handle) {
            Some(b) => {
                b.set_position(to_isometry(&transform), true);
                true
            }
            None => false,
        }
    }

    fn body_count(&self) -> usize {
        self.handles.len()
    }
}

#[cfg(test)]
#[path = "rapier_backend_tests.rs"]
mod tests;
