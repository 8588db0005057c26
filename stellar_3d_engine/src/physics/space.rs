/// PhysicsSpace: the rigid-body world of one running game.
///
/// `tick()` always advances the backend by one fixed timestep, whatever
/// the wall-clock time between calls, so identical tick sequences give
/// identical transforms. After a tick, every collidable entity pulls its
/// body's world transform exactly once (`sync_collidables`). Bodies are
/// only removed explicitly, through `remove_rigid_body` or `despawn`.

use crate::config::PhysicsConfig;
use crate::error::{Error, Result};
use crate::scene::{Entity, EntityKey, EntityKind, Scene};
use crate::{engine_debug, engine_trace};
use super::backend::{BodyHandle, PhysicsBackend, WorldTransform};
use super::rapier_backend::RapierBackend;
use super::shape::RigidBodyDesc;

pub struct PhysicsSpace {
    backend: Box<dyn PhysicsBackend>,
    fixed_timestep: f32,
    max_sub_steps: u32,
    tick_count: u64,
}

impl PhysicsSpace {
    /// Rapier-backed space
    pub fn new(config: &PhysicsConfig) -> Result<Self> {
        Self::with_backend(Box::new(RapierBackend::new(config)), config)
    }

    pub fn with_backend(backend: Box<dyn PhysicsBackend>, config: &PhysicsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            backend,
            fixed_timestep: config.fixed_timestep,
            max_sub_steps: config.max_sub_steps,
            tick_count: 0,
        })
    }

    pub fn backend(&self) -> &dyn PhysicsBackend {
        self.backend.as_ref()
    }

    /// Ticks taken so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn body_count(&self) -> usize {
        self.backend.body_count()
    }

    /// Advance one fixed timestep
    pub fn tick(&mut self) -> u32 {
        let steps = self.backend.step_simulation(self.fixed_timestep, self.max_sub_steps);
        self.tick_count += 1;
        engine_trace!("stellar3d::PhysicsSpace", "Tick {} ({} solver steps)", self.tick_count, steps);
        steps
    }

    /// Copy body transforms into collidable entities not yet synced this tick
    ///
    /// Returns the number of entities updated.
    pub fn sync_collidables(&self, scene: &mut Scene) -> usize {
        let mut synced = 0;
        for (_, entity) in scene.entities_mut() {
            if self.pull_transform(entity) {
                synced += 1;
            }
        }
        synced
    }

    fn pull_transform(&self, entity: &mut Entity) -> bool {
        let Some(body) = entity.body() else {
            return false;
        };
        if entity.synced_tick == Some(self.tick_count) {
            return false;
        }
        match self.backend.world_transform(body) {
            Some(transform) => {
                entity.set_position(transform.position);
                entity.set_rotation(transform.rotation);
                entity.synced_tick = Some(self.tick_count);
                true
            }
            None => false,
        }
    }

    /// Tick, then pull the new transforms into the scene
    pub fn step(&mut self, scene: &mut Scene) -> usize {
        self.tick();
        self.sync_collidables(scene)
    }

    /// Give entity `key` a rigid body at its current transform
    ///
    /// The shape is validated before the backend is touched. Only static
    /// entities can become collidable.
    pub fn add_rigid_body(
        &mut self,
        scene: &mut Scene,
        key: EntityKey,
        desc: &RigidBodyDesc,
    ) -> Result<BodyHandle> {
        desc.validate()?;

        let entity = scene.entity_mut(key).ok_or_else(|| {
            Error::Physics(format!("Unknown entity {:?}", key))
        })?;
        match entity.kind() {
            EntityKind::Static => {}
            EntityKind::Collidable { .. } => {
                return Err(Error::Physics(format!("Entity {:?} already has a rigid body", key)));
            }
            EntityKind::Animated(_) => {
                return Err(Error::Physics(format!("Animated entity {:?} cannot be collidable", key)));
            }
        }

        let transform = WorldTransform::new(entity.position(), entity.rotation());
        let body = self.backend.add_rigid_body(desc, transform)?;
        *entity.kind_mut() = EntityKind::Collidable { body };
        entity.synced_tick = Some(self.tick_count);

        engine_debug!("stellar3d::PhysicsSpace",
            "Rigid body {:?} added for entity {:?} ({:?})", body, key, desc.body_type);
        Ok(body)
    }

    /// Remove the body of entity `key`, turning it back into a static entity
    pub fn remove_rigid_body(&mut self, scene: &mut Scene, key: EntityKey) -> bool {
        let Some(entity) = scene.entity_mut(key) else {
            return false;
        };
        let Some(body) = entity.body() else {
            return false;
        };
        *entity.kind_mut() = EntityKind::Static;
        entity.synced_tick = None;
        self.backend.remove_rigid_body(body)
    }

    /// Remove an entity from the scene along with its body
    pub fn despawn(&mut self, scene: &mut Scene, key: EntityKey) -> Option<Entity> {
        let entity = scene.despawn(key)?;
        if let Some(body) = entity.body() {
            self.backend.remove_rigid_body(body);
        }
        Some(entity)
    }

    /// Teleport a collidable entity (body and cached transform together)
    pub fn set_entity_transform(
        &mut self,
        scene: &mut Scene,
        key: EntityKey,
        transform: WorldTransform,
    ) -> Result<()> {
        let entity = scene.entity_mut(key).ok_or_else(|| {
            Error::Physics(format!("Unknown entity {:?}", key))
        })?;
        if let Some(body) = entity.body() {
            if !self.backend.set_world_transform(body, transform) {
                return Err(Error::Physics(format!("Stale body {:?} on entity {:?}", body, key)));
            }
        }
        entity.set_position(transform.position);
        entity.set_rotation(transform.rotation);
        Ok(())
    }
}

#[cfg(test)]
#[path = "space_tests.rs"]
mod tests;
