use std::sync::Arc;
use glam::{Mat4, Quat, Vec3};
use crate::resource::Mesh;

/// Sky box drawn around the camera
///
/// Rendered with the camera translation removed, so it never moves
/// relative to the viewer.
#[derive(Debug, Clone)]
pub struct SkyBox {
    mesh: Arc<Mesh>,
    scale: f32,
}

impl SkyBox {
    pub fn new(mesh: Arc<Mesh>, scale: f32) -> Self {
        Self { mesh, scale }
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Model-view matrix: view rotation only, then scale
    pub fn model_view_matrix(&self, view: &Mat4) -> Mat4 {
        let mut rotation_only = *view;
        rotation_only.w_axis = glam::Vec4::W;
        rotation_only * Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), Quat::IDENTITY, Vec3::ZERO)
    }
}
