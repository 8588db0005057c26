/// Graphics device module - the GPU collaborator seam
///
/// The engine never talks to OpenGL directly. Everything it needs from the
/// GPU goes through the traits declared here; a backend crate implements them.

pub mod graphics_device;
pub mod buffer;
pub mod texture;
pub mod shader;
pub mod frame_buffer;
pub mod command_list;

pub use graphics_device::*;
pub use buffer::*;
pub use texture::*;
pub use shader::*;
pub use frame_buffer::*;
pub use command_list::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
