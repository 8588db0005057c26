/// Axis-aligned bounding boxes

use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing every point. `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<AABB> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(AABB::new(first, first), |aabb, p| AABB::new(aabb.min.min(p), aabb.max.max(p))))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full size along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Grow each axis to at least `min_size`, keeping the center
    pub fn with_min_size(&self, min_size: f32) -> AABB {
        let center = self.center();
        let half = (self.size() * 0.5).max(Vec3::splat(min_size * 0.5));
        AABB::new(center - half, center + half)
    }

    /// Transform by a matrix (Arvo's method, exact for affine transforms)
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
