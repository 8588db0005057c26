/// GraphicsDevice trait - GPU resource factory

use std::sync::Arc;
use crate::error::Result;
use super::{
    Buffer, BufferDesc, Texture, TextureDesc, ShaderProgram, ShaderProgramDesc,
    Framebuffer, FramebufferDesc,
};

/// Live GPU resource counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphicsDeviceStats {
    /// Buffers created and not yet released
    pub live_buffers: usize,
    /// Textures created and not yet released
    pub live_textures: usize,
    /// Bytes held by live buffers
    pub buffer_bytes: u64,
}

/// Factory for GPU resources
///
/// Implemented by the windowing/GL backend. Resources are reference counted
/// and released when the last `Arc` is dropped.
pub trait GraphicsDevice: Send + Sync {
    /// Allocate a buffer
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Allocate a texture (optionally uploading initial pixels)
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Compile and link a shader program
    ///
    /// # Errors
    ///
    /// `Error::ShaderCompilation` when any stage fails to compile or the
    /// program fails to link. Callers treat this as fatal.
    fn create_shader_program(&mut self, desc: ShaderProgramDesc) -> Result<Arc<dyn ShaderProgram>>;

    /// Create an offscreen framebuffer
    fn create_framebuffer(&mut self, desc: FramebufferDesc) -> Result<Arc<dyn Framebuffer>>;

    /// Current resource counters
    fn stats(&self) -> GraphicsDeviceStats;
}
