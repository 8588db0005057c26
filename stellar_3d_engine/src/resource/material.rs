/// Surface material
///
/// Phong colors, a reflectance scalar and optional color/normal textures.
/// A material without a texture renders with its diffuse color only.

use std::sync::Arc;
use glam::Vec4;
use crate::error::Result;
use crate::graphics_device::{CommandList, UniformValue};
use super::texture::Texture;

/// Default color (opaque white)
pub const DEFAULT_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

#[derive(Debug, Clone)]
pub struct Material {
    ambient: Vec4,
    diffuse: Vec4,
    specular: Vec4,
    reflectance: f32,
    texture: Option<Arc<Texture>>,
    normal_map: Option<Arc<Texture>>,
}

impl Default for Material {
    fn default() -> Self {
        Self::from_color(DEFAULT_COLOR, 0.0)
    }
}

impl Material {
    /// Untextured material with the same color for every Phong term
    pub fn from_color(color: Vec4, reflectance: f32) -> Self {
        Self {
            ambient: color,
            diffuse: color,
            specular: color,
            reflectance,
            texture: None,
            normal_map: None,
        }
    }

    /// Textured material (colors default to white)
    pub fn from_texture(texture: Arc<Texture>, reflectance: f32) -> Self {
        Self {
            texture: Some(texture),
            ..Self::from_color(DEFAULT_COLOR, reflectance)
        }
    }

    pub fn with_colors(mut self, ambient: Vec4, diffuse: Vec4, specular: Vec4) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self
    }

    pub fn with_normal_map(mut self, normal_map: Arc<Texture>) -> Self {
        self.normal_map = Some(normal_map);
        self
    }

    pub fn ambient(&self) -> Vec4 { self.ambient }
    pub fn diffuse(&self) -> Vec4 { self.diffuse }
    pub fn specular(&self) -> Vec4 { self.specular }
    pub fn reflectance(&self) -> f32 { self.reflectance }

    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    pub fn normal_map(&self) -> Option<&Arc<Texture>> {
        self.normal_map.as_ref()
    }

    pub fn is_textured(&self) -> bool {
        self.texture.is_some()
    }

    /// Atlas grid of the color texture, 1x1 when untextured
    pub fn atlas_grid(&self) -> (u32, u32) {
        self.texture.as_ref().map_or((1, 1), |t| (t.rows(), t.cols()))
    }

    /// Upload the `material.*` uniforms
    ///
    /// `textured` tells the shader whether a color texture is actually bound,
    /// which may differ from `is_textured()` when binding failed.
    pub fn upload(&self, cmd: &mut dyn CommandList, textured: bool) -> Result<()> {
        cmd.set_uniform("material.ambient", UniformValue::Vec4(self.ambient))?;
        cmd.set_uniform("material.diffuse", UniformValue::Vec4(self.diffuse))?;
        cmd.set_uniform("material.specular", UniformValue::Vec4(self.specular))?;
        cmd.set_uniform("material.hasTexture", UniformValue::Int(textured as i32))?;
        cmd.set_uniform("material.hasNormalMap", UniformValue::Int(self.normal_map.is_some() as i32))?;
        cmd.set_uniform("material.reflectance", UniformValue::Float(self.reflectance))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
