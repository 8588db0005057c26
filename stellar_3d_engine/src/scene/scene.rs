/// Scene: entities partitioned into per-mesh batches, plus lighting.
///
/// Meshes and entities live in SlotMaps for O(1) insert/remove with stable
/// keys. Each mesh owns a batch (ordered entity keys) so the renderer binds
/// a mesh once and draws every entity of its batch. Batches keep spawn
/// order; despawning removes the key from its batch.

use std::sync::Arc;
use slotmap::{SecondaryMap, SlotMap};
use crate::engine_warn;
use crate::error::{Error, Result};
use crate::resource::{InstancedMesh, Mesh};
use super::entity::{Entity, EntityKey, InstancedMeshKey, MeshHandle, MeshKey};
use super::fog::Fog;
use super::light::SceneLight;
use super::sky_box::SkyBox;

#[derive(Default)]
pub struct Scene {
    meshes: SlotMap<MeshKey, Arc<Mesh>>,
    instanced_meshes: SlotMap<InstancedMeshKey, Arc<InstancedMesh>>,
    entities: SlotMap<EntityKey, Entity>,
    mesh_batches: SecondaryMap<MeshKey, Vec<EntityKey>>,
    instanced_batches: SecondaryMap<InstancedMeshKey, Vec<EntityKey>>,
    scene_light: SceneLight,
    fog: Fog,
    sky_box: Option<SkyBox>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== MESHES =====

    /// Register a mesh; entities reference it through the returned key
    pub fn add_mesh(&mut self, mesh: Arc<Mesh>) -> MeshKey {
        let key = self.meshes.insert(mesh);
        self.mesh_batches.insert(key, Vec::new());
        key
    }

    pub fn add_instanced_mesh(&mut self, mesh: Arc<InstancedMesh>) -> InstancedMeshKey {
        let key = self.instanced_meshes.insert(mesh);
        self.instanced_batches.insert(key, Vec::new());
        key
    }

    pub fn mesh(&self, key: MeshKey) -> Option<&Arc<Mesh>> {
        self.meshes.get(key)
    }

    pub fn instanced_mesh(&self, key: InstancedMeshKey) -> Option<&Arc<InstancedMesh>> {
        self.instanced_meshes.get(key)
    }

    /// Bounding radius of the mesh behind `handle`
    pub fn mesh_radius(&self, handle: MeshHandle) -> Option<f32> {
        radius_of(&self.meshes, &self.instanced_meshes, handle)
    }

    // ===== ENTITIES =====

    /// Add an entity to the batch of its mesh
    pub fn spawn(&mut self, entity: Entity) -> Result<EntityKey> {
        let known = match entity.mesh() {
            MeshHandle::Regular(k) => self.meshes.contains_key(k),
            MeshHandle::Instanced(k) => self.instanced_meshes.contains_key(k),
        };
        if !known {
            return Err(Error::InvalidResource(format!(
                "Entity references an unknown mesh {:?}", entity.mesh()
            )));
        }

        let handle = entity.mesh();
        let key = self.entities.insert(entity);
        match handle {
            MeshHandle::Regular(k) => {
                if let Some(batch) = self.mesh_batches.get_mut(k) {
                    batch.push(key);
                }
            }
            MeshHandle::Instanced(k) => {
                if let Some(batch) = self.instanced_batches.get_mut(k) {
                    batch.push(key);
                }
            }
        }
        Ok(key)
    }

    /// Remove an entity and its batch entry
    ///
    /// A collidable entity keeps its rigid body: remove it through
    /// `PhysicsSpace::despawn` instead.
    pub fn despawn(&mut self, key: EntityKey) -> Option<Entity> {
        let entity = self.entities.remove(key)?;
        let batch = match entity.mesh() {
            MeshHandle::Regular(k) => self.mesh_batches.get_mut(k),
            MeshHandle::Instanced(k) => self.instanced_batches.get_mut(k),
        };
        if let Some(batch) = batch {
            batch.retain(|&k| k != key);
        }
        if entity.body().is_some() {
            engine_warn!("stellar3d::Scene",
                "Despawned collidable entity {:?} without its body; use PhysicsSpace::despawn", key);
        }
        Some(entity)
    }

    pub fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    pub fn entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    pub fn entities_mut(&mut self) -> impl Iterator<Item = (EntityKey, &mut Entity)> {
        self.entities.iter_mut()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Visit every entity along with its mesh bounding radius
    pub(crate) fn for_each_entity_with_radius_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Entity, f32),
    {
        let Self { meshes, instanced_meshes, entities, .. } = self;
        for (_, entity) in entities.iter_mut() {
            let radius = radius_of(meshes, instanced_meshes, entity.mesh()).unwrap_or(0.0);
            f(entity, radius);
        }
    }

    // ===== BATCHES =====

    /// Regular meshes with their entity keys in spawn order
    pub fn mesh_batches(&self) -> impl Iterator<Item = (&Arc<Mesh>, &[EntityKey])> {
        self.mesh_batches.iter().filter_map(|(k, batch)| {
            self.meshes.get(k).map(|mesh| (mesh, batch.as_slice()))
        })
    }

    /// Instanced meshes with their entity keys in spawn order
    pub fn instanced_batches(&self) -> impl Iterator<Item = (&Arc<InstancedMesh>, &[EntityKey])> {
        self.instanced_batches.iter().filter_map(|(k, batch)| {
            self.instanced_meshes.get(k).map(|mesh| (mesh, batch.as_slice()))
        })
    }

    // ===== ENVIRONMENT =====

    pub fn scene_light(&self) -> &SceneLight {
        &self.scene_light
    }

    pub fn scene_light_mut(&mut self) -> &mut SceneLight {
        &mut self.scene_light
    }

    pub fn fog(&self) -> &Fog {
        &self.fog
    }

    pub fn fog_mut(&mut self) -> &mut Fog {
        &mut self.fog
    }

    pub fn sky_box(&self) -> Option<&SkyBox> {
        self.sky_box.as_ref()
    }

    pub fn set_sky_box(&mut self, sky_box: Option<SkyBox>) {
        self.sky_box = sky_box;
    }
}

fn radius_of(
    meshes: &SlotMap<MeshKey, Arc<Mesh>>,
    instanced: &SlotMap<InstancedMeshKey, Arc<InstancedMesh>>,
    handle: MeshHandle,
) -> Option<f32> {
    match handle {
        MeshHandle::Regular(k) => meshes.get(k).map(|m| m.bounding_radius()),
        MeshHandle::Instanced(k) => instanced.get(k).map(|m| m.mesh().bounding_radius()),
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
