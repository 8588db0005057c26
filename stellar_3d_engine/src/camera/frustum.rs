/// Frustum: six clipping planes for visibility tests.
///
/// Each plane is a Vec4 (A, B, C, D) with a unit inward normal (A, B, C).
/// A point P is inside when `dot(N, P) + D >= 0` for all six planes.
/// Built from any view-projection matrix, so the camera frustum and the
/// orthographic light frustum of a shadow cascade share the same tests.

use glam::{Mat4, Vec3, Vec4};
use super::bounds::AABB;

/// Result of a 3-way frustum/AABB classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    Outside,
    Inside,
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Default for Frustum {
    /// Frustum of the identity matrix (the NDC cube)
    fn default() -> Self {
        Self::from_view_projection(&Mat4::IDENTITY)
    }
}

impl Frustum {
    /// Extract normalized planes from `projection * view` (Gribb & Hartmann)
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let r0 = vp.row(0);
        let r1 = vp.row(1);
        let r2 = vp.row(2);
        let r3 = vp.row(3);

        let mut planes = [
            r3 + r0, // left
            r3 - r0, // right
            r3 + r1, // bottom
            r3 - r1, // top
            r3 + r2, // near (GL depth range)
            r3 - r2, // far
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Signed distance from `point` to plane `index` (positive inside)
    pub fn distance(&self, index: usize, point: Vec3) -> f32 {
        let plane = self.planes[index];
        plane.truncate().dot(point) + plane.w
    }

    /// Sphere test: false only when the sphere lies fully outside a plane
    ///
    /// Conservative: a sphere near a frustum corner may pass while being
    /// outside, but a sphere overlapping the frustum never fails.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        (0..6).all(|i| self.distance(i, center) >= -radius)
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.intersects_sphere(point, 0.0)
    }

    /// Positive-vertex test: false only when the box is fully outside a plane
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.planes.iter().all(|plane| {
            let normal = plane.truncate();
            normal.dot(positive_vertex(aabb, normal)) + plane.w >= 0.0
        })
    }

    /// Outside, fully inside, or straddling at least one plane
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        let mut all_inside = true;

        for plane in &self.planes {
            let normal = plane.truncate();
            if normal.dot(positive_vertex(aabb, normal)) + plane.w < 0.0 {
                return FrustumTest::Outside;
            }
            if normal.dot(negative_vertex(aabb, normal)) + plane.w < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }
}

/// Corner furthest along `normal`
fn positive_vertex(aabb: &AABB, normal: Vec3) -> Vec3 {
    Vec3::select(normal.cmpge(Vec3::ZERO), aabb.max, aabb.min)
}

/// Corner furthest against `normal`
fn negative_vertex(aabb: &AABB, normal: Vec3) -> Vec3 {
    Vec3::select(normal.cmpge(Vec3::ZERO), aabb.min, aabb.max)
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
