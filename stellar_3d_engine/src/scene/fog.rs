use glam::Vec3;
use crate::error::Result;
use crate::graphics_device::{CommandList, UniformValue};

/// Exponential distance fog, disabled by default
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub active: bool,
    pub color: Vec3,
    pub density: f32,
}

impl Default for Fog {
    fn default() -> Self {
        Self { active: false, color: Vec3::ZERO, density: 0.0 }
    }
}

impl Fog {
    pub fn new(color: Vec3, density: f32) -> Self {
        Self { active: true, color, density }
    }

    pub fn upload(&self, cmd: &mut dyn CommandList) -> Result<()> {
        cmd.set_uniform("fog.activeFog", UniformValue::Int(self.active as i32))?;
        cmd.set_uniform("fog.colour", UniformValue::Vec3(self.color))?;
        cmd.set_uniform("fog.density", UniformValue::Float(self.density))
    }
}
