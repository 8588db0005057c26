/// Scene lighting
///
/// Light positions and directions are stored in world space. The renderer
/// converts them to view space on upload.

use glam::{Mat4, Vec3};
use crate::engine_warn;
use crate::error::Result;
use crate::graphics_device::{CommandList, UniformValue};

/// Point lights uploaded per frame
pub const MAX_POINT_LIGHTS: usize = 5;
/// Spot lights uploaded per frame
pub const MAX_SPOT_LIGHTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub exponent: f32,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self { constant: 1.0, linear: 0.0, exponent: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Vec3,
    pub position: Vec3,
    pub intensity: f32,
    pub attenuation: Attenuation,
}

impl PointLight {
    pub fn new(color: Vec3, position: Vec3, intensity: f32) -> Self {
        Self { color, position, intensity, attenuation: Attenuation::default() }
    }

    fn upload(&self, cmd: &mut dyn CommandList, prefix: &str, view: &Mat4) -> Result<()> {
        let view_pos = view.transform_point3(self.position);
        cmd.set_uniform(&format!("{}.colour", prefix), UniformValue::Vec3(self.color))?;
        cmd.set_uniform(&format!("{}.position", prefix), UniformValue::Vec3(view_pos))?;
        cmd.set_uniform(&format!("{}.intensity", prefix), UniformValue::Float(self.intensity))?;
        cmd.set_uniform(&format!("{}.att.constant", prefix), UniformValue::Float(self.attenuation.constant))?;
        cmd.set_uniform(&format!("{}.att.linear", prefix), UniformValue::Float(self.attenuation.linear))?;
        cmd.set_uniform(&format!("{}.att.exponent", prefix), UniformValue::Float(self.attenuation.exponent))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub point_light: PointLight,
    pub cone_direction: Vec3,
    /// Cosine of the cut-off angle
    pub cut_off: f32,
}

impl SpotLight {
    /// `cut_off_degrees` is the half-angle of the cone
    pub fn new(point_light: PointLight, cone_direction: Vec3, cut_off_degrees: f32) -> Self {
        Self {
            point_light,
            cone_direction,
            cut_off: cut_off_degrees.to_radians().cos(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Vec3,
    /// Direction the light travels
    pub direction: Vec3,
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            direction: Vec3::new(0.0, -1.0, 0.0),
            intensity: 1.0,
        }
    }
}

/// Every light of a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLight {
    pub ambient_light: Vec3,
    pub point_lights: Vec<PointLight>,
    pub spot_lights: Vec<SpotLight>,
    pub directional_light: DirectionalLight,
    /// Ambient term applied to the sky box
    pub sky_box_light: Vec3,
}

impl Default for SceneLight {
    fn default() -> Self {
        Self {
            ambient_light: Vec3::splat(0.3),
            point_lights: Vec::new(),
            spot_lights: Vec::new(),
            directional_light: DirectionalLight::default(),
            sky_box_light: Vec3::ONE,
        }
    }
}

impl SceneLight {
    /// Upload the lighting uniforms of the scene shader
    ///
    /// Lights past `MAX_POINT_LIGHTS` / `MAX_SPOT_LIGHTS` are dropped.
    pub fn upload(&self, cmd: &mut dyn CommandList, view: &Mat4) -> Result<()> {
        cmd.set_uniform("ambientLight", UniformValue::Vec3(self.ambient_light))?;

        if self.point_lights.len() > MAX_POINT_LIGHTS {
            engine_warn!("stellar3d::SceneLight",
                "{} point lights, only the first {} are rendered",
                self.point_lights.len(), MAX_POINT_LIGHTS);
        }
        for (i, light) in self.point_lights.iter().take(MAX_POINT_LIGHTS).enumerate() {
            light.upload(cmd, &format!("pointLights[{}]", i), view)?;
        }

        if self.spot_lights.len() > MAX_SPOT_LIGHTS {
            engine_warn!("stellar3d::SceneLight",
                "{} spot lights, only the first {} are rendered",
                self.spot_lights.len(), MAX_SPOT_LIGHTS);
        }
        for (i, spot) in self.spot_lights.iter().take(MAX_SPOT_LIGHTS).enumerate() {
            let prefix = format!("spotLights[{}]", i);
            spot.point_light.upload(cmd, &format!("{}.pl", prefix), view)?;
            let dir = view.transform_vector3(spot.cone_direction).normalize_or_zero();
            cmd.set_uniform(&format!("{}.conedir", prefix), UniformValue::Vec3(dir))?;
            cmd.set_uniform(&format!("{}.cutoff", prefix), UniformValue::Float(spot.cut_off))?;
        }

        let light = &self.directional_light;
        // Shader expects the direction towards the light
        let to_light = view.transform_vector3(-light.direction).normalize_or_zero();
        cmd.set_uniform("directionalLight.colour", UniformValue::Vec3(light.color))?;
        cmd.set_uniform("directionalLight.direction", UniformValue::Vec4(to_light.extend(0.0)))?;
        cmd.set_uniform("directionalLight.intensity", UniformValue::Float(light.intensity))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
