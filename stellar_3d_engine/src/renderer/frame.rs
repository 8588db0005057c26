/// Per-frame inputs and outputs of the renderer

use crate::camera::Camera;
use crate::graphics_device::ShaderProgramDesc;
use crate::physics::PhysicsSpace;
use crate::scene::Scene;

/// Programs compiled once by `Renderer::new`
#[derive(Debug, Clone)]
pub struct RendererShaders {
    /// Lit color pass (regular and instanced)
    pub scene: ShaderProgramDesc,
    /// Depth-only shadow pass
    pub depth: ShaderProgramDesc,
    /// Sky box; the scene program is used when absent
    pub sky: Option<ShaderProgramDesc>,
}

/// Everything one frame reads or mutates
pub struct FrameContext<'a> {
    pub scene: &'a mut Scene,
    pub camera: &'a mut Camera,
    /// Stepped once at the start of the frame
    pub physics: Option<&'a mut PhysicsSpace>,
}

impl<'a> FrameContext<'a> {
    pub fn new(scene: &'a mut Scene, camera: &'a mut Camera) -> Self {
        Self { scene, camera, physics: None }
    }

    pub fn with_physics(mut self, physics: &'a mut PhysicsSpace) -> Self {
        self.physics = Some(physics);
        self
    }
}

/// Counters of one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Solver steps run by this frame's physics tick
    pub physics_steps: u32,
    /// Non-instanced draws of the color pass (sky box included)
    pub draw_calls: usize,
    /// Instanced draws of the color pass
    pub instanced_draw_calls: usize,
    /// Draws of the shadow pass, every cascade included
    pub shadow_draw_calls: usize,
    pub visible_entities: usize,
    pub culled_entities: usize,
    /// Visible entities not drawn (texture binding failure, degenerate radius)
    pub skipped_draws: usize,
}
