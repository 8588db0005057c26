/// CommandList trait - immediate-mode GPU commands issued by the renderer
///
/// Commands execute in submission order on the thread owning the GPU
/// context. There is no deferred recording: a frame is simply the sequence
/// of calls made between two `Window::present()` calls.

use std::sync::Arc;
use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::error::Result;
use super::{Buffer, Framebuffer, ShaderProgram, Texture};

/// Viewport rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Viewport covering `width` x `height` from the origin
    pub fn full(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }
}

bitflags::bitflags! {
    /// Attachments cleared by `CommandList::clear`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
    }
}

/// Value uploaded to a named uniform of the bound program
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
    Mat4Array(Vec<Mat4>),
    FloatArray(Vec<f32>),
}

/// Vertex attribute slots shared by every program
pub mod attribute_slot {
    pub const POSITION: u32 = 0;
    pub const TEX_COORD: u32 = 1;
    pub const NORMAL: u32 = 2;
    pub const WEIGHTS: u32 = 3;
    pub const JOINT_INDICES: u32 = 4;
    /// First of the per-instance slots (model matrix columns, atlas offset, selection)
    pub const INSTANCE: u32 = 5;
}

/// Texture units shared by every program
pub mod texture_unit {
    pub const DIFFUSE: u32 = 0;
    pub const NORMAL_MAP: u32 = 1;
    /// Shadow depth array, one layer per cascade
    pub const SHADOW_MAP: u32 = 2;
}

/// GPU command stream
pub trait CommandList: Send {
    /// Bind an offscreen framebuffer, or the window's default one with `None`
    fn bind_framebuffer(&mut self, framebuffer: Option<&Arc<dyn Framebuffer>>) -> Result<()>;

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Clear the selected attachments of the bound framebuffer
    fn clear(&mut self, flags: ClearFlags, color: [f32; 4]) -> Result<()>;

    /// Bind a program, or unbind with `None`
    fn use_program(&mut self, program: Option<&Arc<dyn ShaderProgram>>) -> Result<()>;

    /// Set a uniform on the bound program
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<()>;

    /// Bind a vertex or instance buffer to an attribute slot
    fn bind_vertex_buffer(&mut self, slot: u32, buffer: &Arc<dyn Buffer>) -> Result<()>;

    fn bind_index_buffer(&mut self, buffer: &Arc<dyn Buffer>) -> Result<()>;

    /// Bind a texture to a sampler unit
    fn bind_texture(&mut self, unit: u32, texture: &Arc<dyn Texture>) -> Result<()>;

    /// Retarget the bound framebuffer's depth attachment to one texture layer
    fn set_depth_layer(&mut self, texture: &Arc<dyn Texture>, layer: u32) -> Result<()>;

    /// Draw `index_count` indices from the bound index buffer
    fn draw_indexed(&mut self, index_count: u32) -> Result<()>;

    /// Instanced variant of `draw_indexed`
    fn draw_indexed_instanced(&mut self, index_count: u32, instance_count: u32) -> Result<()>;
}
