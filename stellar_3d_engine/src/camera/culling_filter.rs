/// Per-frame frustum culling over a scene.
///
/// Each entity is approximated by a sphere of radius
/// `scale * mesh.bounding_radius()` around its position. The result is
/// written into the entity's `inside_frustum` flag instead of building a
/// filtered list.

use glam::{Mat4, Vec3};
use crate::scene::{Entity, Scene};
use super::frustum::Frustum;

#[derive(Debug, Clone, Default)]
pub struct FrustumCullingFilter {
    proj_view: Mat4,
    frustum: Frustum,
}

/// Visible and culled entity counts of one `filter` pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    pub visible: usize,
    pub culled: usize,
}

impl FrustumCullingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the planes from this frame's projection and view
    pub fn update_frustum(&mut self, projection: &Mat4, view: &Mat4) {
        self.proj_view = *projection * *view;
        self.frustum = Frustum::from_view_projection(&self.proj_view);
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn proj_view(&self) -> &Mat4 {
        &self.proj_view
    }

    pub fn inside_frustum(&self, center: Vec3, radius: f32) -> bool {
        self.frustum.intersects_sphere(center, radius)
    }

    /// Flag every entity of `scene` visible or not
    pub fn filter(&self, scene: &mut Scene) -> CullStats {
        let mut stats = CullStats::default();
        scene.for_each_entity_with_radius_mut(|entity, mesh_radius| {
            let visible = self.test_entity(entity, mesh_radius);
            entity.set_inside_frustum(visible);
            if visible {
                stats.visible += 1;
            } else {
                stats.culled += 1;
            }
        });
        stats
    }

    /// Sphere test for one entity; opted-out entities always pass
    pub fn test_entity(&self, entity: &Entity, mesh_radius: f32) -> bool {
        if !entity.frustum_culling() {
            return true;
        }
        let radius = entity.scale().abs() * mesh_radius;
        // A broken radius must not hide geometry
        if !radius.is_finite() {
            return true;
        }
        self.inside_frustum(entity.position(), radius)
    }
}

#[cfg(test)]
#[path = "culling_filter_tests.rs"]
mod tests;
