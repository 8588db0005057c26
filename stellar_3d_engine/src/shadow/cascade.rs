/// One cascade of a cascaded shadow map.
///
/// A cascade covers the `[z_near, z_far)` slice of the camera's view depth.
/// Every frame the slice's 8 world-space corners are recomputed, and an
/// orthographic light projection is fitted tightly around them.

use glam::{Mat4, Vec3, Vec4};
use crate::engine_warn;
use crate::error::{Error, Result};
use crate::scene::DirectionalLight;

/// Smallest extent of the light-space box on any axis
pub const MIN_EXTENT: f32 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowCascade {
    z_near: f32,
    z_far: f32,
    ortho_projection: Mat4,
    light_view: Mat4,
    corners: [Vec3; 8],
    centroid: Vec3,
}

impl ShadowCascade {
    pub fn new(z_near: f32, z_far: f32) -> Self {
        Self {
            z_near,
            z_far,
            ortho_projection: Mat4::IDENTITY,
            light_view: Mat4::IDENTITY,
            corners: [Vec3::ZERO; 8],
            centroid: Vec3::ZERO,
        }
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    pub fn ortho_projection(&self) -> &Mat4 {
        &self.ortho_projection
    }

    pub fn light_view(&self) -> &Mat4 {
        &self.light_view
    }

    /// World-space corners of the slice (near face first)
    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    pub fn centroid(&self) -> Vec3 {
        self.centroid
    }

    /// `ortho_projection * light_view`
    pub fn light_space_matrix(&self) -> Mat4 {
        self.ortho_projection * self.light_view
    }

    /// Whether a view depth falls in `[z_near, z_far)`
    pub fn contains_depth(&self, depth: f32) -> bool {
        depth >= self.z_near && depth < self.z_far
    }

    /// Refit the light matrices for this frame
    ///
    /// `aspect` is width / height of the screen, `light_offset` pushes the
    /// light eye further back so casters outside the slice still land in
    /// the map. Non-finite corners (degenerate camera matrices) keep the
    /// previous frame's matrices.
    pub fn update(
        &mut self,
        fov: f32,
        aspect: f32,
        view: &Mat4,
        light: &DirectionalLight,
        light_offset: f32,
    ) {
        let projection = Mat4::perspective_rh_gl(fov, aspect, self.z_near, self.z_far);
        let corners = frustum_corners(&(projection * *view));
        if corners.iter().any(|c| !c.is_finite()) {
            engine_warn!("stellar3d::ShadowCascade",
                "Degenerate frustum slice [{}, {}), keeping previous light matrices",
                self.z_near, self.z_far);
            return;
        }

        let centroid = corners.iter().copied().sum::<Vec3>() / 8.0;
        let radius = corners.iter()
            .map(|c| c.distance(centroid))
            .fold(0.0f32, f32::max);

        let mut direction = light.direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            direction = Vec3::NEG_Y;
        }
        let up = if direction.dot(Vec3::Y).abs() > 0.95 { Vec3::X } else { Vec3::Y };
        let eye = centroid - direction * (radius + light_offset);
        let light_view = Mat4::look_at_rh(eye, centroid, up);

        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for corner in &corners {
            let p = light_view.transform_point3(*corner);
            min = min.min(p);
            max = max.max(p);
        }
        let (min, max) = clamp_extents(min, max);

        // Light looks down -Z: depth runs from -max.z to -min.z
        self.ortho_projection = Mat4::orthographic_rh_gl(
            min.x, max.x, min.y, max.y, -max.z - light_offset, -min.z,
        );
        self.light_view = light_view;
        self.corners = corners;
        self.centroid = centroid;
    }
}

/// World-space corners of the frustum described by `proj_view`
pub fn frustum_corners(proj_view: &Mat4) -> [Vec3; 8] {
    let inverse = proj_view.inverse();
    let mut corners = [Vec3::ZERO; 8];
    let mut i = 0;
    for z in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for x in [-1.0, 1.0] {
                let p = inverse * Vec4::new(x, y, z, 1.0);
                corners[i] = p.truncate() / p.w;
                i += 1;
            }
        }
    }
    corners
}

/// Grow every axis of `[min, max]` to at least `MIN_EXTENT`
fn clamp_extents(min: Vec3, max: Vec3) -> (Vec3, Vec3) {
    let center = (min + max) * 0.5;
    let half = ((max - min) * 0.5).max(Vec3::splat(MIN_EXTENT * 0.5));
    (center - half, center + half)
}

/// Build the cascades for `splits` (ascending far distances)
///
/// Cascade `i` covers `[splits[i - 1], splits[i])`, with the first one
/// starting at `z_near`.
pub fn build_cascades(z_near: f32, splits: &[f32]) -> Result<Vec<ShadowCascade>> {
    if splits.is_empty() {
        return Err(Error::InvalidResource("At least one cascade split is required".to_string()));
    }
    let mut cascades = Vec::with_capacity(splits.len());
    let mut near = z_near;
    for &far in splits {
        if !(far > near) {
            return Err(Error::InvalidResource(format!(
                "Cascade splits must ascend past z_near {} (got {:?})", z_near, splits
            )));
        }
        cascades.push(ShadowCascade::new(near, far));
        near = far;
    }
    Ok(cascades)
}

/// Index of the cascade whose slice holds `depth`
///
/// The last cascade also owns its far boundary.
pub fn cascade_for_depth(cascades: &[ShadowCascade], depth: f32) -> Option<usize> {
    if let Some(i) = cascades.iter().position(|c| c.contains_depth(depth)) {
        return Some(i);
    }
    match cascades.last() {
        Some(last) if depth == last.z_far => Some(cascades.len() - 1),
        _ => None,
    }
}

#[cfg(test)]
#[path = "cascade_tests.rs"]
mod tests;
