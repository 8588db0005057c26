/// Renderer - per-frame orchestration
///
/// One `render_frame` call runs, in this order:
///
/// 1. physics tick and collidable sync
/// 2. camera view matrix update
/// 3. shadow pass (cascades refit, each culled against its light frustum)
/// 4. camera frustum cull
/// 5. color pass: regular batches, instanced batches, then the sky box
///
/// Presenting the frame belongs to the window and is left to the caller.
/// Inside the frame, a failed texture bind or a degenerate bounding radius
/// skips the affected draws and logs a warning; it never aborts the frame.

use std::sync::Arc;
use glam::Mat4;
use crate::camera::{CullStats, FrustumCullingFilter};
use crate::config::{EngineConfig, ProjectionConfig};
use crate::error::Result;
use crate::graphics_device::{
    ClearFlags, CommandList, GraphicsDevice, ShaderProgram, ShaderProgramDesc, UniformValue,
    Viewport, texture_unit,
};
use crate::resource::Material;
use crate::scene::{Entity, EntityKey, Scene};
use crate::shadow::ShadowRenderer;
use crate::transform::Transformation;
use crate::{engine_error, engine_info, engine_warn};
use super::frame::{FrameContext, FrameStats, RendererShaders};

const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

pub struct Renderer {
    transformation: Transformation,
    culling: FrustumCullingFilter,
    shadows: ShadowRenderer,
    scene_program: Arc<dyn ShaderProgram>,
    sky_program: Option<Arc<dyn ShaderProgram>>,
    projection: ProjectionConfig,
    frustum_culling: bool,
    width: u32,
    height: u32,
}

impl Renderer {
    /// Compile the programs and allocate the shadow maps
    ///
    /// # Errors
    ///
    /// Invalid configuration, shader compile/link failure or shadow map
    /// allocation failure. All of them are fatal at startup.
    pub fn new(
        device: &mut dyn GraphicsDevice,
        config: &EngineConfig,
        shaders: RendererShaders,
    ) -> Result<Self> {
        config.validate()?;

        let scene_program = compile(device, shaders.scene)?;
        let depth_program = compile(device, shaders.depth)?;
        let sky_program = shaders.sky.map(|desc| compile(device, desc)).transpose()?;

        let mut shadows = ShadowRenderer::new();
        shadows.setup(device, &config.projection, &config.shadow, depth_program)?;

        engine_info!("stellar3d::Renderer", "Renderer ready ({}x{}, {} shadow cascades)",
            config.window.width, config.window.height, shadows.cascades().len());

        Ok(Self {
            transformation: Transformation::new(),
            culling: FrustumCullingFilter::new(),
            shadows,
            scene_program,
            sky_program,
            projection: config.projection,
            frustum_culling: config.frustum_culling,
            width: config.window.width,
            height: config.window.height,
        })
    }

    /// New framebuffer size; the projection follows on the next frame
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.transformation.projection_matrix()
    }

    pub fn culling_filter(&self) -> &FrustumCullingFilter {
        &self.culling
    }

    pub fn shadow_renderer(&self) -> &ShadowRenderer {
        &self.shadows
    }

    pub fn set_frustum_culling(&mut self, enabled: bool) {
        self.frustum_culling = enabled;
    }

    /// Render one frame
    pub fn render_frame(&mut self, frame: FrameContext<'_>, cmd: &mut dyn CommandList) -> Result<FrameStats> {
        let FrameContext { scene, camera, physics } = frame;
        let mut stats = FrameStats::default();

        // 1. Physics
        if let Some(physics) = physics {
            stats.physics_steps = physics.tick();
            physics.sync_collidables(scene);
        }

        // 2. View
        let view = Transformation::update_view_matrix(camera);
        let p = self.projection;
        let projection = self.transformation.get_projection_matrix(
            p.fov_radians(), self.width as f32, self.height as f32, p.z_near, p.z_far,
        );

        // 3. Shadows
        self.shadows.update(p.fov_radians(), self.width, self.height, &view,
            &scene.scene_light().directional_light)?;
        stats.shadow_draw_calls = self.shadows.render(scene, cmd)?;

        // 4. Cull
        let cull = self.cull(scene, &projection, &view);
        stats.visible_entities = cull.visible;
        stats.culled_entities = cull.culled;

        // 5. Color
        self.color_pass(scene, &projection, &view, cmd, &mut stats)?;

        Ok(stats)
    }

    fn cull(&mut self, scene: &mut Scene, projection: &Mat4, view: &Mat4) -> CullStats {
        if self.frustum_culling {
            self.culling.update_frustum(projection, view);
            return self.culling.filter(scene);
        }
        let mut visible = 0;
        for (_, entity) in scene.entities_mut() {
            entity.set_inside_frustum(true);
            visible += 1;
        }
        CullStats { visible, culled: 0 }
    }

    fn color_pass(
        &self,
        scene: &Scene,
        projection: &Mat4,
        view: &Mat4,
        cmd: &mut dyn CommandList,
        stats: &mut FrameStats,
    ) -> Result<()> {
        cmd.bind_framebuffer(None)?;
        cmd.set_viewport(Viewport::full(self.width, self.height))?;
        cmd.clear(ClearFlags::COLOR | ClearFlags::DEPTH, CLEAR_COLOR)?;
        cmd.use_program(Some(&self.scene_program))?;

        cmd.set_uniform("projectionMatrix", UniformValue::Mat4(*projection))?;
        cmd.set_uniform("viewMatrix", UniformValue::Mat4(*view))?;
        cmd.set_uniform("texture_sampler", UniformValue::Int(texture_unit::DIFFUSE as i32))?;
        cmd.set_uniform("normalMap", UniformValue::Int(texture_unit::NORMAL_MAP as i32))?;
        scene.scene_light().upload(cmd, view)?;
        scene.fog().upload(cmd)?;
        self.shadows.bind_for_color_pass(cmd)?;

        // Regular batches: one draw per visible entity
        cmd.set_uniform("isInstanced", UniformValue::Int(0))?;
        for (mesh, keys) in scene.mesh_batches() {
            let visible = drawable_entities(scene, keys, stats);
            if visible.is_empty() {
                continue;
            }
            let Some(textured) = bind_material(mesh.material(), cmd) else {
                stats.skipped_draws += visible.len();
                continue;
            };
            mesh.material().upload(cmd, textured)?;
            stats.draw_calls += mesh.render_list(visible, cmd, |entity, cmd| {
                let model_view = Transformation::build_model_view_matrix(entity, view);
                cmd.set_uniform("modelViewMatrix", UniformValue::Mat4(model_view))?;
                cmd.set_uniform("selectedNonInstanced", UniformValue::Float(if entity.is_selected() { 1.0 } else { 0.0 }))?;
                if let Some(animation) = entity.animation() {
                    cmd.set_uniform("jointsMatrix", UniformValue::Mat4Array(animation.current_joints().to_vec()))?;
                }
                Ok(true)
            })?;
        }

        // Instanced batches: one draw per chunk
        cmd.set_uniform("isInstanced", UniformValue::Int(1))?;
        for (mesh, keys) in scene.instanced_batches() {
            let visible = drawable_entities(scene, keys, stats);
            if visible.is_empty() {
                continue;
            }
            let Some(textured) = bind_material(mesh.mesh().material(), cmd) else {
                stats.skipped_draws += visible.len();
                continue;
            };
            mesh.mesh().material().upload(cmd, textured)?;
            let (rows, cols) = mesh.mesh().material().atlas_grid();
            cmd.set_uniform("numCols", UniformValue::Float(cols as f32))?;
            cmd.set_uniform("numRows", UniformValue::Float(rows as f32))?;
            stats.instanced_draw_calls += if mesh.is_billboard() {
                mesh.render_list_instanced(&visible, cmd, |e| Transformation::build_billboard_model_matrix(e, view))?
            } else {
                mesh.render_list_instanced(&visible, cmd, Transformation::build_model_matrix)?
            };
        }

        // Sky box last, behind everything already drawn
        if let Some(sky_box) = scene.sky_box() {
            let program = self.sky_program.as_ref().unwrap_or(&self.scene_program);
            cmd.use_program(Some(program))?;
            cmd.set_uniform("projectionMatrix", UniformValue::Mat4(*projection))?;
            cmd.set_uniform("modelViewMatrix", UniformValue::Mat4(sky_box.model_view_matrix(view)))?;
            cmd.set_uniform("ambientLight", UniformValue::Vec3(scene.scene_light().sky_box_light))?;
            cmd.set_uniform("isInstanced", UniformValue::Int(0))?;
            match bind_material(sky_box.mesh().material(), cmd) {
                Some(textured) => {
                    sky_box.mesh().material().upload(cmd, textured)?;
                    sky_box.mesh().bind(cmd)?;
                    sky_box.mesh().render(cmd)?;
                    stats.draw_calls += 1;
                }
                None => stats.skipped_draws += 1,
            }
        }

        cmd.use_program(None)
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("frustum_culling", &self.frustum_culling)
            .field("shadows", &self.shadows)
            .finish()
    }
}

fn compile(device: &mut dyn GraphicsDevice, desc: ShaderProgramDesc) -> Result<Arc<dyn ShaderProgram>> {
    let name = desc.name.clone();
    device.create_shader_program(desc).map_err(|e| {
        engine_error!("stellar3d::Renderer", "Failed to build program '{}': {}", name, e);
        e
    })
}

/// Visible entities of a batch whose bounding sphere is usable
///
/// Degenerate radii (zero, negative or non-finite) are counted as skipped.
fn drawable_entities<'s>(
    scene: &'s Scene,
    keys: &[EntityKey],
    stats: &mut FrameStats,
) -> Vec<&'s Entity> {
    let mut drawable = Vec::with_capacity(keys.len());
    for entity in keys.iter().filter_map(|&key| scene.entity(key)) {
        if !entity.is_inside_frustum() {
            continue;
        }
        let radius = scene.mesh_radius(entity.mesh()).unwrap_or(0.0) * entity.scale().abs();
        if !(radius.is_finite() && radius > 0.0) {
            engine_warn!("stellar3d::Renderer",
                "Skipping draw with degenerate bounding radius {} at {:?}", radius, entity.position());
            stats.skipped_draws += 1;
            continue;
        }
        drawable.push(entity);
    }
    drawable
}

/// Bind the material's textures
///
/// `Some(textured)` when the draw can go ahead, `None` when a bind failed
/// and the draws using this material must be skipped.
fn bind_material(material: &Material, cmd: &mut dyn CommandList) -> Option<bool> {
    let bindings = [
        (texture_unit::DIFFUSE, material.texture()),
        (texture_unit::NORMAL_MAP, material.normal_map()),
    ];
    for (unit, texture) in bindings {
        if let Some(texture) = texture {
            if let Err(e) = cmd.bind_texture(unit, texture.gpu_texture()) {
                engine_warn!("stellar3d::Renderer", "Texture unit {} bind failed, skipping draws: {}", unit, e);
                return None;
            }
        }
    }
    Some(material.texture().is_some())
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
