/// First-person camera.
///
/// Position plus (pitch, yaw, roll) in degrees. Moves are relative to the
/// current yaw, the way a first-person camera walks. The view matrix is
/// cached and refreshed by `Transformation::update_view_matrix`.

use glam::{Mat4, Vec3};

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    rotation: Vec3,
    view_matrix: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO)
    }
}

impl Camera {
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            rotation,
            view_matrix: crate::transform::view_matrix(position, rotation),
        }
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// (pitch, yaw, roll) in degrees
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// View matrix as of the last update
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    pub fn set_view_matrix(&mut self, view: Mat4) {
        self.view_matrix = view;
    }

    /// Move by an offset expressed in the camera's yaw frame
    ///
    /// `dz < 0` walks forward, `dx > 0` strafes right, `dy` is vertical.
    pub fn move_position(&mut self, dx: f32, dy: f32, dz: f32) {
        let yaw = self.rotation.y.to_radians();
        if dz != 0.0 {
            self.position.x += -yaw.sin() * dz;
            self.position.z += yaw.cos() * dz;
        }
        if dx != 0.0 {
            self.position.x += yaw.cos() * dx;
            self.position.z += yaw.sin() * dx;
        }
        self.position.y += dy;
    }

    /// Add to pitch, yaw and roll (degrees)
    pub fn move_rotation(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotation += Vec3::new(dx, dy, dz);
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
