/// Resource-level texture
///
/// Wraps a GPU texture with atlas layout information. A texture used as an
/// atlas is split into `rows` x `cols` equal cells; instanced entities pick
/// their cell through `Entity::texture_pos`.

use std::sync::Arc;
use glam::Vec2;
use crate::error::{Error, Result};
use crate::graphics_device::{self, GraphicsDevice, TextureDesc, TextureFormat};

/// Decoded RGBA8 image, as returned by a `TextureLoader`
#[derive(Debug, Clone)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 texels
    pub pixels: Vec<u8>,
}

/// Image decoding collaborator (PNG/JPEG decoding lives outside the engine)
pub trait TextureLoader {
    fn load(&mut self, path: &str) -> Result<TextureImage>;
}

/// GPU texture plus atlas grid
pub struct Texture {
    gpu: Arc<dyn graphics_device::Texture>,
    rows: u32,
    cols: u32,
}

impl Texture {
    /// Wrap an existing GPU texture
    pub fn new(gpu: Arc<dyn graphics_device::Texture>, rows: u32, cols: u32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidResource(format!(
                "Texture atlas grid must be at least 1x1 (got {}x{})", rows, cols
            )));
        }
        Ok(Self { gpu, rows, cols })
    }

    /// Upload a decoded image as a single-layer RGBA texture
    pub fn from_image(
        device: &mut dyn GraphicsDevice,
        image: TextureImage,
        rows: u32,
        cols: u32,
    ) -> Result<Self> {
        let gpu = device.create_texture(TextureDesc {
            width: image.width,
            height: image.height,
            array_layers: 1,
            format: TextureFormat::R8G8B8A8_UNORM,
            data: Some(image.pixels),
        })?;
        Self::new(gpu, rows, cols)
    }

    pub fn gpu_texture(&self) -> &Arc<dyn graphics_device::Texture> {
        &self.gpu
    }

    pub fn width(&self) -> u32 {
        self.gpu.width()
    }

    pub fn height(&self) -> u32 {
        self.gpu.height()
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// UV offset of atlas cell `pos`
    pub fn atlas_offset(&self, pos: u32) -> Vec2 {
        atlas_offset(pos, self.rows, self.cols)
    }
}

/// UV offset of cell `pos` in a `rows` x `cols` atlas
///
/// `col = pos % cols`, `row = pos / rows`, offset = `(col / cols, row / rows)`.
/// Rows are not wrapped.
pub fn atlas_offset(pos: u32, rows: u32, cols: u32) -> Vec2 {
    let rows = rows.max(1);
    let cols = cols.max(1);
    let col = pos % cols;
    let row = pos / rows;
    Vec2::new(col as f32 / cols as f32, row as f32 / rows as f32)
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish()
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
