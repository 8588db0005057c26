//! Engine configuration
//!
//! Plain structs with defaults. `EngineConfig::validate()` is called by the
//! renderer before any GPU resource is created.

use glam::Vec3;
use crate::error::{Error, Result};

/// Window settings handed to the window backend
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Block on vertical sync in `Window::present()`
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Stellar3D".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl ProjectionConfig {
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            z_near: 0.01,
            z_far: 1000.0,
        }
    }
}

/// Cascaded shadow map settings
#[derive(Debug, Clone)]
pub struct ShadowConfig {
    /// Width and height of every cascade layer
    pub map_size: u32,
    /// Split `i` sits at `z_far / cascade_divisors[i]`
    pub cascade_divisors: Vec<f32>,
    /// Extra distance between the light eye and the cascade centroid
    pub light_offset: f32,
}

impl ShadowConfig {
    /// Far distance of every cascade, ascending
    pub fn split_distances(&self, z_far: f32) -> Vec<f32> {
        self.cascade_divisors.iter().map(|d| z_far / d).collect()
    }
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            map_size: 4096,
            cascade_divisors: vec![20.0, 10.0, 1.0],
            light_offset: 20.0,
        }
    }
}

/// Rigid-body world settings
#[derive(Debug, Clone, Copy)]
pub struct PhysicsConfig {
    pub gravity: Vec3,
    /// Solver step in seconds
    pub fixed_timestep: f32,
    /// Upper bound on solver steps per `step_simulation` call
    pub max_sub_steps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            fixed_timestep: 1.0 / 60.0,
            max_sub_steps: 10,
        }
    }
}

impl PhysicsConfig {
    /// A zero or non-finite timestep would stall the simulation
    pub fn validate(&self) -> Result<()> {
        if !(self.fixed_timestep > 0.0 && self.fixed_timestep.is_finite()) || self.max_sub_steps == 0 {
            return Err(Error::InitializationFailed(format!(
                "Physics timestep and sub-step count must be positive (got {} / {})",
                self.fixed_timestep, self.max_sub_steps
            )));
        }
        Ok(())
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub projection: ProjectionConfig,
    pub shadow: ShadowConfig,
    pub physics: PhysicsConfig,
    /// Frame cap when vsync is off
    pub target_fps: u32,
    /// Fixed logic updates per second
    pub target_ups: u32,
    pub frustum_culling: bool,
    /// Default per-instanced-mesh instance capacity
    pub instance_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            projection: ProjectionConfig::default(),
            shadow: ShadowConfig::default(),
            physics: PhysicsConfig::default(),
            target_fps: 75,
            target_ups: 30,
            frustum_culling: true,
            instance_capacity: 1024,
        }
    }
}

impl EngineConfig {
    /// Reject configurations the renderer cannot work with
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(Error::InitializationFailed(msg));

        if self.window.width == 0 || self.window.height == 0 {
            return fail(format!(
                "Window dimensions must be non-zero (got {}x{})",
                self.window.width, self.window.height
            ));
        }

        let p = &self.projection;
        if !(p.fov_degrees > 0.0 && p.fov_degrees < 180.0) {
            return fail(format!("Field of view must be in (0, 180) degrees (got {})", p.fov_degrees));
        }
        if !(p.z_near > 0.0 && p.z_far > p.z_near) {
            return fail(format!(
                "Clip planes must satisfy 0 < z_near < z_far (got {} / {})",
                p.z_near, p.z_far
            ));
        }

        let divisors = &self.shadow.cascade_divisors;
        if divisors.is_empty() {
            return fail("At least one shadow cascade is required".to_string());
        }
        if divisors.windows(2).any(|w| w[1] >= w[0]) {
            return fail(format!("Cascade divisors must be strictly decreasing (got {:?})", divisors));
        }
        if divisors.last() != Some(&1.0) {
            return fail(format!("Last cascade divisor must be 1 (got {:?})", divisors));
        }
        if self.shadow.split_distances(p.z_far)[0] <= p.z_near {
            return fail("First cascade split falls inside the near plane".to_string());
        }
        if self.shadow.map_size == 0 {
            return fail("Shadow map size must be non-zero".to_string());
        }

        self.physics.validate()?;
        if self.target_fps == 0 || self.target_ups == 0 {
            return fail("Target FPS and UPS must be positive".to_string());
        }
        if self.instance_capacity == 0 {
            return fail("Instance capacity must be positive".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
