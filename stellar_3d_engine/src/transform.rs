/// Transformation: model, view and projection matrices.
///
/// Model matrices always compose scale first, then rotation, then
/// translation. Every matrix is built from scratch on each call; nothing
/// is accumulated across calls.

use glam::{Mat3, Mat4, Quat, Vec3};
use crate::camera::Camera;
use crate::scene::Entity;

#[derive(Debug, Clone, Default)]
pub struct Transformation {
    projection: Mat4,
    ortho: Mat4,
}

impl Transformation {
    pub fn new() -> Self {
        Self { projection: Mat4::IDENTITY, ortho: Mat4::IDENTITY }
    }

    /// Perspective projection with aspect ratio `width / height`
    pub fn get_projection_matrix(&mut self, fov: f32, width: f32, height: f32, z_near: f32, z_far: f32) -> Mat4 {
        let aspect = width / height.max(1.0);
        self.projection = Mat4::perspective_rh_gl(fov, aspect, z_near, z_far);
        self.projection
    }

    /// Last projection built by `get_projection_matrix`
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Orthographic projection (HUD, shadow cascades)
    pub fn build_ortho_projection(&mut self, left: f32, right: f32, bottom: f32, top: f32, z_near: f32, z_far: f32) -> Mat4 {
        self.ortho = Mat4::orthographic_rh_gl(left, right, bottom, top, z_near, z_far);
        self.ortho
    }

    /// Recompute and store the camera's view matrix
    ///
    /// Rotate about X by pitch, then about Y by yaw, then translate by the
    /// negated camera position.
    pub fn update_view_matrix(camera: &mut Camera) -> Mat4 {
        let view = view_matrix(camera.position(), camera.rotation());
        camera.set_view_matrix(view);
        view
    }

    /// Scale, then rotate, then translate
    pub fn build_model_matrix(entity: &Entity) -> Mat4 {
        model_matrix(entity.position(), entity.rotation(), entity.scale())
    }

    /// `view * model`
    pub fn build_model_view_matrix(entity: &Entity, view: &Mat4) -> Mat4 {
        *view * Self::build_model_matrix(entity)
    }

    /// Model matrix whose rotation cancels the view rotation
    ///
    /// The transposed 3x3 part of `view` replaces the entity rotation, so
    /// the entity always faces the camera.
    pub fn build_billboard_model_matrix(entity: &Entity, view: &Mat4) -> Mat4 {
        let facing = Mat3::from_mat4(*view).transpose();
        Mat4::from_translation(entity.position())
            * Mat4::from_mat3(facing)
            * Mat4::from_scale(Vec3::splat(entity.scale()))
    }

    /// `light_view * model`, for the depth pass
    pub fn build_model_light_view_matrix(entity: &Entity, light_view: &Mat4) -> Mat4 {
        *light_view * Self::build_model_matrix(entity)
    }
}

pub fn model_matrix(position: Vec3, rotation: Quat, scale: f32) -> Mat4 {
    Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, position)
}

/// View matrix from a position and (pitch, yaw, roll) in degrees
pub fn view_matrix(position: Vec3, rotation: Vec3) -> Mat4 {
    Mat4::from_rotation_x(rotation.x.to_radians())
        * Mat4::from_rotation_y(rotation.y.to_radians())
        * Mat4::from_translation(-position)
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
