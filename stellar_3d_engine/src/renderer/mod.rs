/// Renderer module - frame orchestration over the scene

mod frame;
mod renderer;

pub use frame::{FrameContext, FrameStats, RendererShaders};
pub use renderer::Renderer;
