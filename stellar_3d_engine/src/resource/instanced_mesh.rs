//! Instanced mesh
//!
//! A mesh plus a per-instance buffer sized for a fixed number of instances.
//! Entities are streamed through that buffer in chunks of at most
//! `capacity` and each chunk costs one instanced draw call.

use std::sync::Arc;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};
use crate::error::{Error, Result};
use crate::graphics_device::{attribute_slot, Buffer, BufferDesc, BufferUsage, CommandList, GraphicsDevice};
use crate::scene::Entity;
use super::material::Material;
use super::mesh::Mesh;
use super::mesh_data::MeshData;
use super::texture::atlas_offset;

/// Per-instance GPU record
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    /// Column-major model matrix
    pub model: [[f32; 4]; 4],
    /// UV offset of the atlas cell
    pub tex_offset: [f32; 2],
    /// 1.0 when selected
    pub selected: f32,
}

impl InstanceRaw {
    pub fn new(model: Mat4, tex_offset: Vec2, selected: bool) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            tex_offset: tex_offset.to_array(),
            selected: if selected { 1.0 } else { 0.0 },
        }
    }
}

/// Number of instanced draws needed for `count` entities
pub fn chunk_count(count: usize, capacity: usize) -> usize {
    count.div_ceil(capacity.max(1))
}

pub struct InstancedMesh {
    mesh: Mesh,
    instance_buffer: Arc<dyn Buffer>,
    capacity: usize,
    billboard: bool,
}

impl InstancedMesh {
    pub fn new(
        device: &mut dyn GraphicsDevice,
        data: &MeshData,
        material: Material,
        capacity: usize,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidResource("Instance capacity must be positive".to_string()));
        }
        let mesh = Mesh::new(device, data, material)?;
        let instance_buffer = device.create_buffer(BufferDesc {
            size: (capacity * std::mem::size_of::<InstanceRaw>()) as u64,
            usage: BufferUsage::Instance,
        })?;
        Ok(Self { mesh, instance_buffer, capacity, billboard: false })
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Make every instance face the camera
    pub fn with_billboard(mut self, billboard: bool) -> Self {
        self.billboard = billboard;
        self
    }

    pub fn is_billboard(&self) -> bool {
        self.billboard
    }

    /// Draw `entities` in chunks of at most `capacity`
    ///
    /// `model_of` gives the model matrix uploaded for each entity (billboard
    /// or regular). Returns the number of instanced draw calls.
    pub fn render_list_instanced<F>(
        &self,
        entities: &[&Entity],
        cmd: &mut dyn CommandList,
        mut model_of: F,
    ) -> Result<usize>
    where
        F: FnMut(&Entity) -> Mat4,
    {
        if entities.is_empty() {
            return Ok(0);
        }

        self.mesh.bind(cmd)?;
        cmd.bind_vertex_buffer(attribute_slot::INSTANCE, &self.instance_buffer)?;

        let (rows, cols) = self.mesh.material().atlas_grid();
        let mut staging = Vec::with_capacity(self.capacity.min(entities.len()));
        let mut draws = 0;

        for chunk in entities.chunks(self.capacity) {
            staging.clear();
            staging.extend(chunk.iter().map(|entity| InstanceRaw::new(
                model_of(entity),
                atlas_offset(entity.texture_pos(), rows, cols),
                entity.is_selected(),
            )));
            self.instance_buffer.update(0, bytemuck::cast_slice(&staging))?;
            cmd.draw_indexed_instanced(self.mesh.index_count(), chunk.len() as u32)?;
            draws += 1;
        }

        Ok(draws)
    }
}

impl std::fmt::Debug for InstancedMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstancedMesh")
            .field("mesh", &self.mesh)
            .field("capacity", &self.capacity)
            .field("billboard", &self.billboard)
            .finish()
    }
}

#[cfg(test)]
#[path = "instanced_mesh_tests.rs"]
mod tests;
