/// ShadowRenderer - cascaded shadow map pass
///
/// Lifecycle:
///
/// ```text
/// Uninitialized --setup--> Configured --update--> PerFrameUpdated --render--> Rendered
///                                                        ^                       |
///                                                        +-------- update -------+
/// ```
///
/// `update` refits every cascade to the current camera and light. `render`
/// draws the depth of shadow casters into each cascade layer, culling
/// against that cascade's light frustum. Calls out of this order fail with
/// `Error::InvalidState`.

use std::sync::Arc;
use glam::Mat4;
use crate::camera::FrustumCullingFilter;
use crate::config::{ProjectionConfig, ShadowConfig};
use crate::engine_debug;
use crate::error::{Error, Result};
use crate::graphics_device::{
    ClearFlags, CommandList, GraphicsDevice, ShaderProgram, UniformValue, Viewport,
};
use crate::scene::{DirectionalLight, Entity, Scene};
use crate::transform::Transformation;
use super::buffer::ShadowBuffer;
use super::cascade::{build_cascades, cascade_for_depth, ShadowCascade};

/// Where a `ShadowRenderer` is in its per-frame cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowState {
    Uninitialized,
    Configured,
    PerFrameUpdated,
    Rendered,
}

pub struct ShadowRenderer {
    state: ShadowState,
    cascades: Vec<ShadowCascade>,
    buffer: Option<ShadowBuffer>,
    depth_program: Option<Arc<dyn ShaderProgram>>,
    light_offset: f32,
}

impl Default for ShadowRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadowRenderer {
    pub fn new() -> Self {
        Self {
            state: ShadowState::Uninitialized,
            cascades: Vec::new(),
            buffer: None,
            depth_program: None,
            light_offset: 0.0,
        }
    }

    pub fn state(&self) -> ShadowState {
        self.state
    }

    pub fn cascades(&self) -> &[ShadowCascade] {
        &self.cascades
    }

    pub fn buffer(&self) -> Option<&ShadowBuffer> {
        self.buffer.as_ref()
    }

    /// Build the cascades and the depth array
    ///
    /// Split `i` sits at `projection.z_far / shadow.cascade_divisors[i]`.
    pub fn setup(
        &mut self,
        device: &mut dyn GraphicsDevice,
        projection: &ProjectionConfig,
        shadow: &ShadowConfig,
        depth_program: Arc<dyn ShaderProgram>,
    ) -> Result<()> {
        if self.state != ShadowState::Uninitialized {
            return Err(Error::InvalidState("Shadow renderer is already configured".to_string()));
        }

        let splits = shadow.split_distances(projection.z_far);
        let cascades = build_cascades(projection.z_near, &splits)?;
        let buffer = ShadowBuffer::new(device, shadow.map_size, cascades.len() as u32)?;

        engine_debug!("stellar3d::ShadowRenderer",
            "Configured {} cascades (splits {:?}, {}x{} maps)",
            cascades.len(), splits, shadow.map_size, shadow.map_size);

        self.cascades = cascades;
        self.buffer = Some(buffer);
        self.depth_program = Some(depth_program);
        self.light_offset = shadow.light_offset;
        self.state = ShadowState::Configured;
        Ok(())
    }

    /// Refit every cascade to this frame's camera and light
    pub fn update(
        &mut self,
        fov: f32,
        width: u32,
        height: u32,
        view: &Mat4,
        light: &DirectionalLight,
    ) -> Result<()> {
        if self.state == ShadowState::Uninitialized {
            return Err(Error::InvalidState("Shadow renderer updated before setup".to_string()));
        }

        let aspect = width as f32 / height.max(1) as f32;
        for cascade in &mut self.cascades {
            cascade.update(fov, aspect, view, light, self.light_offset);
        }
        self.state = ShadowState::PerFrameUpdated;
        Ok(())
    }

    /// Cascade covering a view-space depth (distance along the view axis)
    pub fn cascade_index(&self, depth: f32) -> Option<usize> {
        cascade_for_depth(&self.cascades, depth)
    }

    /// Draw every shadow caster into its cascade layers
    ///
    /// Returns the number of draw calls issued.
    pub fn render(&mut self, scene: &Scene, cmd: &mut dyn CommandList) -> Result<usize> {
        if self.state != ShadowState::PerFrameUpdated {
            return Err(Error::InvalidState(format!(
                "Shadow render requires fresh cascades (state {:?})", self.state
            )));
        }
        let (Some(buffer), Some(program)) = (&self.buffer, &self.depth_program) else {
            return Err(Error::InvalidState("Shadow renderer has no depth target".to_string()));
        };

        cmd.bind_framebuffer(Some(buffer.framebuffer()))?;
        cmd.set_viewport(Viewport::full(buffer.map_size(), buffer.map_size()))?;
        cmd.use_program(Some(program))?;

        let mut draws = 0;
        let mut filter = FrustumCullingFilter::new();

        for (layer, cascade) in self.cascades.iter().enumerate() {
            cmd.set_depth_layer(buffer.depth_map(), layer as u32)?;
            cmd.clear(ClearFlags::DEPTH, [0.0; 4])?;
            cmd.set_uniform("orthoProjectionMatrix", UniformValue::Mat4(*cascade.ortho_projection()))?;
            cmd.set_uniform("lightViewMatrix", UniformValue::Mat4(*cascade.light_view()))?;

            filter.update_frustum(cascade.ortho_projection(), cascade.light_view());
            let light_view = cascade.light_view();

            cmd.set_uniform("isInstanced", UniformValue::Int(0))?;
            for (mesh, keys) in scene.mesh_batches() {
                let casters: Vec<&Entity> = keys.iter()
                    .filter_map(|&key| scene.entity(key))
                    .filter(|entity| is_caster(scene, &filter, entity))
                    .collect();
                if casters.is_empty() {
                    continue;
                }
                draws += mesh.render_list(casters, cmd, |entity, cmd| {
                    let model_light_view = Transformation::build_model_light_view_matrix(entity, light_view);
                    cmd.set_uniform("modelLightViewMatrix", UniformValue::Mat4(model_light_view))?;
                    if let Some(animation) = entity.animation() {
                        cmd.set_uniform("jointsMatrix", UniformValue::Mat4Array(animation.current_joints().to_vec()))?;
                    }
                    Ok(true)
                })?;
            }

            cmd.set_uniform("isInstanced", UniformValue::Int(1))?;
            for (mesh, keys) in scene.instanced_batches() {
                let casters: Vec<&Entity> = keys.iter()
                    .filter_map(|&key| scene.entity(key))
                    .filter(|entity| is_caster(scene, &filter, entity))
                    .collect();
                draws += mesh.render_list_instanced(&casters, cmd, Transformation::build_model_matrix)?;
            }
        }

        self.state = ShadowState::Rendered;
        Ok(draws)
    }

    /// Bind the shadow maps and cascade matrices for the color pass
    pub fn bind_for_color_pass(&self, cmd: &mut dyn CommandList) -> Result<()> {
        if self.state != ShadowState::Rendered {
            return Err(Error::InvalidState(format!(
                "Shadow maps sampled before being rendered (state {:?})", self.state
            )));
        }
        let Some(buffer) = &self.buffer else {
            return Err(Error::InvalidState("Shadow renderer has no depth target".to_string()));
        };

        buffer.bind_textures(cmd)?;
        cmd.set_uniform("orthoProjectionMatrix",
            UniformValue::Mat4Array(self.cascades.iter().map(|c| *c.ortho_projection()).collect()))?;
        cmd.set_uniform("lightViewMatrix",
            UniformValue::Mat4Array(self.cascades.iter().map(|c| *c.light_view()).collect()))?;
        cmd.set_uniform("cascadeFarPlanes",
            UniformValue::FloatArray(self.cascades.iter().map(|c| c.z_far()).collect()))
    }
}

/// Shadow casters with a usable radius inside the cascade's light frustum
fn is_caster(scene: &Scene, filter: &FrustumCullingFilter, entity: &Entity) -> bool {
    if !entity.casts_shadow() {
        return false;
    }
    let Some(mesh_radius) = scene.mesh_radius(entity.mesh()) else {
        return false;
    };
    let radius = entity.scale().abs() * mesh_radius;
    if !(radius.is_finite() && radius > 0.0) {
        return false;
    }
    filter.inside_frustum(entity.position(), radius)
}

impl std::fmt::Debug for ShadowRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowRenderer")
            .field("state", &self.state)
            .field("cascades", &self.cascades.len())
            .field("buffer", &self.buffer)
            .finish()
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
