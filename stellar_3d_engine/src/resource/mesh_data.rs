//! CPU-side mesh data, as produced by asset loaders and shape builders.

use glam::Vec3;
use crate::camera::AABB;
use crate::error::{Error, Result};

/// Joint influences per vertex for skinned meshes
pub const MAX_WEIGHTS: usize = 4;

/// Flat attribute arrays describing one indexed triangle mesh
///
/// Optional attributes are left empty when absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// xyz per vertex
    pub positions: Vec<f32>,
    /// uv per vertex
    pub tex_coords: Vec<f32>,
    /// xyz per vertex
    pub normals: Vec<f32>,
    /// `MAX_WEIGHTS` per vertex
    pub weights: Vec<f32>,
    /// `MAX_WEIGHTS` per vertex
    pub joint_indices: Vec<i32>,
    /// Triangle list
    pub indices: Vec<u32>,
}

fn invalid(msg: String) -> Error {
    Error::InvalidResource(msg)
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_skinned(&self) -> bool {
        !self.weights.is_empty()
    }

    /// Iterate vertex positions
    pub fn vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions.chunks_exact(3).map(|p| Vec3::new(p[0], p[1], p[2]))
    }

    /// Check attribute array sizes and index bounds
    pub fn validate(&self) -> Result<()> {
        if self.positions.is_empty() {
            return Err(invalid("Mesh has no vertices".to_string()));
        }
        if self.positions.len() % 3 != 0 {
            return Err(invalid(format!(
                "Position array length {} is not a multiple of 3", self.positions.len()
            )));
        }
        let n = self.vertex_count();

        let check_len = |name: &str, len: usize, per_vertex: usize| -> Result<()> {
            if len != 0 && len != n * per_vertex {
                return Err(invalid(format!(
                    "{} array has {} values, expected {} for {} vertices",
                    name, len, n * per_vertex, n
                )));
            }
            Ok(())
        };
        check_len("Texture coordinate", self.tex_coords.len(), 2)?;
        check_len("Normal", self.normals.len(), 3)?;
        check_len("Weight", self.weights.len(), MAX_WEIGHTS)?;
        check_len("Joint index", self.joint_indices.len(), MAX_WEIGHTS)?;
        if self.weights.is_empty() != self.joint_indices.is_empty() {
            return Err(invalid("Weights and joint indices must be provided together".to_string()));
        }

        if self.indices.is_empty() || self.indices.len() % 3 != 0 {
            return Err(invalid(format!(
                "Index count {} is not a non-empty multiple of 3", self.indices.len()
            )));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(invalid(format!("Index {} out of range for {} vertices", bad, n)));
        }
        if self.positions.iter().any(|v| !v.is_finite()) {
            return Err(invalid("Mesh positions must be finite".to_string()));
        }

        Ok(())
    }

    /// Conservative radius around the local origin
    ///
    /// Length of the per-axis maximum absolute coordinate. Every vertex
    /// satisfies `|v| <= radius` since each of its components is bounded by
    /// the matching component of that vector.
    pub fn bounding_radius(&self) -> f32 {
        self.vertices()
            .fold(Vec3::ZERO, |acc, v| acc.max(v.abs()))
            .length()
    }

    /// Local-space bounds
    pub fn aabb(&self) -> Option<AABB> {
        AABB::from_points(self.vertices())
    }
}

#[cfg(test)]
#[path = "mesh_data_tests.rs"]
mod tests;
