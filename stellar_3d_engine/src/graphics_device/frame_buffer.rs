/// Framebuffer trait - offscreen render destination
///
/// The shadow pass renders into a depth-only framebuffer whose attachment
/// is retargeted to one layer of a texture array per cascade.

use std::sync::Arc;
use super::Texture;

/// Offscreen framebuffer
pub trait Framebuffer: Send + Sync {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Descriptor for creating a framebuffer
pub struct FramebufferDesc {
    /// Depth attachment (a depth texture, possibly layered)
    pub depth_attachment: Option<Arc<dyn Texture>>,
    pub width: u32,
    pub height: u32,
}
