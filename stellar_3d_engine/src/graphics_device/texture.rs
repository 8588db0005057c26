/// Texture trait and texture descriptor

use crate::error::{Error, Result};

/// Pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    /// 8-bit RGBA color
    R8G8B8A8_UNORM,
    /// 32-bit float depth (shadow maps)
    D32_FLOAT,
}

impl TextureFormat {
    /// Bytes per texel
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::R8G8B8A8_UNORM => 4,
            TextureFormat::D32_FLOAT => 4,
        }
    }

    /// Whether the format is a depth format
    pub fn is_depth(&self) -> bool {
        matches!(self, TextureFormat::D32_FLOAT)
    }
}

/// Descriptor for creating a texture (2D or 2D array)
#[derive(Debug, Clone)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    /// 1 for a plain 2D texture
    pub array_layers: u32,
    pub format: TextureFormat,
    /// Initial texels for layer 0, tightly packed
    pub data: Option<Vec<u8>>,
}

impl TextureDesc {
    /// Check dimensions and initial data size
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.array_layers == 0 {
            return Err(Error::InvalidResource(format!(
                "Texture dimensions must be non-zero (got {}x{}x{})",
                self.width, self.height, self.array_layers
            )));
        }
        if let Some(data) = &self.data {
            let expected = self.width as usize * self.height as usize
                * self.format.bytes_per_pixel() as usize;
            if data.len() != expected {
                return Err(Error::InvalidResource(format!(
                    "Texture data size mismatch: expected {} bytes, got {}",
                    expected, data.len()
                )));
            }
        }
        Ok(())
    }
}

/// GPU texture
pub trait Texture: Send + Sync {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn array_layers(&self) -> u32;
    fn format(&self) -> TextureFormat;
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
