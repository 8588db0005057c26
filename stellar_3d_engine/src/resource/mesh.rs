//! GPU mesh
//!
//! A `Mesh` owns one GPU buffer per vertex attribute plus its index buffer,
//! and is shared by every entity that draws it. Buffers are released when
//! the last `Arc<Mesh>` goes away.

use std::sync::Arc;
use crate::camera::AABB;
use crate::error::Result;
use crate::graphics_device::{
    attribute_slot, Buffer, BufferDesc, BufferUsage, CommandList, GraphicsDevice,
};
use super::material::Material;
use super::mesh_data::MeshData;

pub struct Mesh {
    positions: Arc<dyn Buffer>,
    tex_coords: Option<Arc<dyn Buffer>>,
    normals: Option<Arc<dyn Buffer>>,
    weights: Option<Arc<dyn Buffer>>,
    joint_indices: Option<Arc<dyn Buffer>>,
    indices: Arc<dyn Buffer>,
    vertex_count: u32,
    index_count: u32,
    bounding_radius: f32,
    aabb: AABB,
    material: Material,
}

fn upload(device: &mut dyn GraphicsDevice, usage: BufferUsage, bytes: &[u8]) -> Result<Arc<dyn Buffer>> {
    let buffer = device.create_buffer(BufferDesc { size: bytes.len() as u64, usage })?;
    buffer.update(0, bytes)?;
    Ok(buffer)
}

fn upload_optional(device: &mut dyn GraphicsDevice, bytes: &[u8]) -> Result<Option<Arc<dyn Buffer>>> {
    if bytes.is_empty() {
        Ok(None)
    } else {
        upload(device, BufferUsage::Vertex, bytes).map(Some)
    }
}

impl Mesh {
    /// Validate `data`, upload it and compute the bounding radius
    pub fn new(device: &mut dyn GraphicsDevice, data: &MeshData, material: Material) -> Result<Self> {
        data.validate()?;

        let positions = upload(device, BufferUsage::Vertex, bytemuck::cast_slice(&data.positions))?;
        let tex_coords = upload_optional(device, bytemuck::cast_slice(&data.tex_coords))?;
        let normals = upload_optional(device, bytemuck::cast_slice(&data.normals))?;
        let weights = upload_optional(device, bytemuck::cast_slice(&data.weights))?;
        let joint_indices = upload_optional(device, bytemuck::cast_slice(&data.joint_indices))?;
        let indices = upload(device, BufferUsage::Index, bytemuck::cast_slice(&data.indices))?;

        // validate() guarantees at least one vertex
        let aabb = data.aabb().unwrap_or(AABB::new(glam::Vec3::ZERO, glam::Vec3::ZERO));

        Ok(Self {
            positions,
            tex_coords,
            normals,
            weights,
            joint_indices,
            indices,
            vertex_count: data.vertex_count() as u32,
            index_count: data.indices.len() as u32,
            bounding_radius: data.bounding_radius(),
            aabb,
            material,
        })
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Upper bound of `|v|` over every vertex `v`
    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }

    /// Local-space bounds
    pub fn aabb(&self) -> &AABB {
        &self.aabb
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Mesh carries joint weights
    pub fn is_skinned(&self) -> bool {
        self.weights.is_some()
    }

    /// Bind every attribute buffer and the index buffer
    pub fn bind(&self, cmd: &mut dyn CommandList) -> Result<()> {
        cmd.bind_vertex_buffer(attribute_slot::POSITION, &self.positions)?;
        let optional = [
            (attribute_slot::TEX_COORD, &self.tex_coords),
            (attribute_slot::NORMAL, &self.normals),
            (attribute_slot::WEIGHTS, &self.weights),
            (attribute_slot::JOINT_INDICES, &self.joint_indices),
        ];
        for (slot, buffer) in optional {
            if let Some(buffer) = buffer {
                cmd.bind_vertex_buffer(slot, buffer)?;
            }
        }
        cmd.bind_index_buffer(&self.indices)
    }

    /// Draw the bound mesh once
    pub fn render(&self, cmd: &mut dyn CommandList) -> Result<()> {
        cmd.draw_indexed(self.index_count)
    }

    /// Bind once, then draw once per item that `prepare` accepts
    ///
    /// `prepare` uploads per-draw state (model matrix, joints) and returns
    /// `false` to skip the item. Returns the number of draws issued.
    pub fn render_list<T, I, F>(&self, items: I, cmd: &mut dyn CommandList, mut prepare: F) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T, &mut dyn CommandList) -> Result<bool>,
    {
        self.bind(cmd)?;
        let mut draws = 0;
        for item in items {
            if prepare(item, cmd)? {
                self.render(cmd)?;
                draws += 1;
            }
        }
        Ok(draws)
    }
}

impl std::fmt::Debug for Mesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mesh")
            .field("vertex_count", &self.vertex_count)
            .field("index_count", &self.index_count)
            .field("bounding_radius", &self.bounding_radius)
            .finish()
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
