/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Buffers keep their bytes in memory so tests can inspect uploaded
/// instance data. Live buffers/textures are counted through shared atomics,
/// so release-on-drop is observable. `MockCommandList` records each command
/// as a string and every uniform upload.

use std::sync::atomic::{AtomicUsize, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use crate::error::{Error, Result};
use crate::engine_bail;
use super::{
    GraphicsDevice, GraphicsDeviceStats,
    Buffer, BufferDesc, BufferUsage,
    Texture, TextureDesc, TextureFormat,
    ShaderProgram, ShaderProgramDesc,
    Framebuffer, FramebufferDesc,
    CommandList, Viewport, ClearFlags, UniformValue,
};

#[derive(Debug, Default)]
struct LiveCounters {
    buffers: AtomicUsize,
    textures: AtomicUsize,
    buffer_bytes: AtomicU64,
}

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub usage: BufferUsage,
    pub data: Mutex<Vec<u8>>,
    pub writes: AtomicUsize,
    counters: Arc<LiveCounters>,
}

impl MockBuffer {
    fn new(desc: &BufferDesc, counters: Arc<LiveCounters>) -> Self {
        counters.buffers.fetch_add(1, Ordering::SeqCst);
        counters.buffer_bytes.fetch_add(desc.size, Ordering::SeqCst);
        Self {
            usage: desc.usage,
            data: Mutex::new(vec![0; desc.size as usize]),
            writes: AtomicUsize::new(0),
            counters,
        }
    }

    /// Copy of the buffer contents
    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().unwrap().clone()
    }
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.data.lock().unwrap().len() as u64
    }

    fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let mut bytes = self.data.lock().unwrap();
        let start = offset as usize;
        let end = start + data.len();
        if end > bytes.len() {
            engine_bail!("stellar3d::mock",
                "Buffer update out of range: {}..{} (size {})", start, end, bytes.len());
        }
        bytes[start..end].copy_from_slice(data);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for MockBuffer {
    fn drop(&mut self) {
        let size = self.data.lock().map(|d| d.len() as u64).unwrap_or(0);
        self.counters.buffers.fetch_sub(1, Ordering::SeqCst);
        self.counters.buffer_bytes.fetch_sub(size, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub width: u32,
    pub height: u32,
    pub array_layers: u32,
    pub format: TextureFormat,
    counters: Arc<LiveCounters>,
}

impl Texture for MockTexture {
    fn width(&self) -> u32 { self.width }
    fn height(&self) -> u32 { self.height }
    fn array_layers(&self) -> u32 { self.array_layers }
    fn format(&self) -> TextureFormat { self.format }
}

impl Drop for MockTexture {
    fn drop(&mut self) {
        self.counters.textures.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock ShaderProgram / Framebuffer
// ============================================================================

#[derive(Debug)]
pub struct MockShaderProgram {
    pub name: String,
}

impl ShaderProgram for MockShaderProgram {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug)]
pub struct MockFramebuffer {
    pub width: u32,
    pub height: u32,
}

impl Framebuffer for MockFramebuffer {
    fn width(&self) -> u32 { self.width }
    fn height(&self) -> u32 { self.height }
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// Records every command as a string, plus every uniform upload
#[derive(Debug, Default)]
pub struct MockCommandList {
    pub commands: Vec<String>,
    pub uniforms: Vec<(String, UniformValue)>,
    /// `bind_texture` on this unit fails
    pub failing_texture_unit: Option<u32>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of commands starting with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.commands.iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Index of the first command starting with `prefix`
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.commands.iter().position(|c| c.starts_with(prefix))
    }

    /// Every value uploaded to the uniform `name`, in order
    pub fn uniform_values(&self, name: &str) -> Vec<&UniformValue> {
        self.uniforms.iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v)
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.commands.clear();
        self.uniforms.clear();
    }
}

impl CommandList for MockCommandList {
    fn bind_framebuffer(&mut self, framebuffer: Option<&Arc<dyn Framebuffer>>) -> Result<()> {
        match framebuffer {
            Some(fb) => self.commands.push(format!("bind_framebuffer({}x{})", fb.width(), fb.height())),
            None => self.commands.push("bind_framebuffer(default)".to_string()),
        }
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.commands.push(format!("set_viewport({}x{})", viewport.width, viewport.height));
        Ok(())
    }

    fn clear(&mut self, flags: ClearFlags, _color: [f32; 4]) -> Result<()> {
        let mut parts = Vec::new();
        if flags.contains(ClearFlags::COLOR) {
            parts.push("COLOR");
        }
        if flags.contains(ClearFlags::DEPTH) {
            parts.push("DEPTH");
        }
        self.commands.push(format!("clear({})", parts.join("|")));
        Ok(())
    }

    fn use_program(&mut self, program: Option<&Arc<dyn ShaderProgram>>) -> Result<()> {
        match program {
            Some(p) => self.commands.push(format!("use_program({})", p.name())),
            None => self.commands.push("use_program(none)".to_string()),
        }
        Ok(())
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<()> {
        self.commands.push(format!("set_uniform({})", name));
        self.uniforms.push((name.to_string(), value));
        Ok(())
    }

    fn bind_vertex_buffer(&mut self, slot: u32, _buffer: &Arc<dyn Buffer>) -> Result<()> {
        self.commands.push(format!("bind_vertex_buffer({})", slot));
        Ok(())
    }

    fn bind_index_buffer(&mut self, _buffer: &Arc<dyn Buffer>) -> Result<()> {
        self.commands.push("bind_index_buffer".to_string());
        Ok(())
    }

    fn bind_texture(&mut self, unit: u32, _texture: &Arc<dyn Texture>) -> Result<()> {
        if self.failing_texture_unit == Some(unit) {
            return Err(Error::BackendError(format!("texture unit {} unavailable", unit)));
        }
        self.commands.push(format!("bind_texture({})", unit));
        Ok(())
    }

    fn set_depth_layer(&mut self, _texture: &Arc<dyn Texture>, layer: u32) -> Result<()> {
        self.commands.push(format!("set_depth_layer({})", layer));
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32) -> Result<()> {
        self.commands.push(format!("draw_indexed({})", index_count));
        Ok(())
    }

    fn draw_indexed_instanced(&mut self, index_count: u32, instance_count: u32) -> Result<()> {
        self.commands.push(format!("draw_indexed_instanced({}, {})", index_count, instance_count));
        Ok(())
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Device that tracks created resources without a GPU
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    counters: Arc<LiveCounters>,
    /// Programs with these names fail to compile
    pub failing_programs: Vec<String>,
    pub created_programs: Vec<String>,
    buffers: Vec<Weak<MockBuffer>>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device whose program `name` fails to compile
    pub fn failing_program(name: &str) -> Self {
        Self {
            failing_programs: vec![name.to_string()],
            ..Self::default()
        }
    }
}

impl MockGraphicsDevice {
    /// Still-alive buffers created with `usage`, in creation order
    pub fn live_buffers_with_usage(&self, usage: BufferUsage) -> Vec<Arc<MockBuffer>> {
        self.buffers.iter()
            .filter_map(Weak::upgrade)
            .filter(|b| b.usage == usage)
            .collect()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        if desc.size == 0 {
            engine_bail!("stellar3d::mock", "Cannot create a zero-sized {:?} buffer", desc.usage);
        }
        let buffer = Arc::new(MockBuffer::new(&desc, self.counters.clone()));
        self.buffers.push(Arc::downgrade(&buffer));
        Ok(buffer)
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        desc.validate()?;
        self.counters.textures.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockTexture {
            width: desc.width,
            height: desc.height,
            array_layers: desc.array_layers,
            format: desc.format,
            counters: self.counters.clone(),
        }))
    }

    fn create_shader_program(&mut self, desc: ShaderProgramDesc) -> Result<Arc<dyn ShaderProgram>> {
        if self.failing_programs.contains(&desc.name) {
            return Err(Error::ShaderCompilation(format!("{}: 0:1 syntax error", desc.name)));
        }
        self.created_programs.push(desc.name.clone());
        Ok(Arc::new(MockShaderProgram { name: desc.name }))
    }

    fn create_framebuffer(&mut self, desc: FramebufferDesc) -> Result<Arc<dyn Framebuffer>> {
        Ok(Arc::new(MockFramebuffer { width: desc.width, height: desc.height }))
    }

    fn stats(&self) -> GraphicsDeviceStats {
        GraphicsDeviceStats {
            live_buffers: self.counters.buffers.load(Ordering::SeqCst),
            live_textures: self.counters.textures.load(Ordering::SeqCst),
            buffer_bytes: self.counters.buffer_bytes.load(Ordering::SeqCst),
        }
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
