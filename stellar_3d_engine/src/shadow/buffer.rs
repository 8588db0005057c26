/// Shadow map storage: one depth texture array with a layer per cascade,
/// attached to a depth-only framebuffer.

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{
    CommandList, Framebuffer, FramebufferDesc, GraphicsDevice, Texture, TextureDesc,
    TextureFormat, UniformValue, texture_unit,
};

pub struct ShadowBuffer {
    depth_map: Arc<dyn Texture>,
    framebuffer: Arc<dyn Framebuffer>,
    map_size: u32,
    cascade_count: u32,
}

impl ShadowBuffer {
    /// Allocate a `map_size` x `map_size` depth array with `cascade_count` layers
    pub fn new(device: &mut dyn GraphicsDevice, map_size: u32, cascade_count: u32) -> Result<Self> {
        let depth_map = device.create_texture(TextureDesc {
            width: map_size,
            height: map_size,
            array_layers: cascade_count,
            format: TextureFormat::D32_FLOAT,
            data: None,
        })?;
        let framebuffer = device.create_framebuffer(FramebufferDesc {
            depth_attachment: Some(depth_map.clone()),
            width: map_size,
            height: map_size,
        })?;
        Ok(Self { depth_map, framebuffer, map_size, cascade_count })
    }

    pub fn depth_map(&self) -> &Arc<dyn Texture> {
        &self.depth_map
    }

    pub fn framebuffer(&self) -> &Arc<dyn Framebuffer> {
        &self.framebuffer
    }

    pub fn map_size(&self) -> u32 {
        self.map_size
    }

    pub fn cascade_count(&self) -> u32 {
        self.cascade_count
    }

    /// Bind the depth array for sampling in the color pass
    pub fn bind_textures(&self, cmd: &mut dyn CommandList) -> Result<()> {
        cmd.bind_texture(texture_unit::SHADOW_MAP, &self.depth_map)?;
        cmd.set_uniform("shadowMap", UniformValue::Int(texture_unit::SHADOW_MAP as i32))
    }
}

impl std::fmt::Debug for ShadowBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowBuffer")
            .field("map_size", &self.map_size)
            .field("cascade_count", &self.cascade_count)
            .finish()
    }
}
