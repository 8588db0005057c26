/// Window/input collaborator seam
///
/// The engine never creates windows or polls the OS itself. A backend owns
/// the native window and GL context and exposes this narrow interface,
/// called once per frame from the game loop thread.

use winit::event::MouseButton;
use winit::keyboard::KeyCode;
use crate::error::Result;

/// Native window + input state
pub trait Window {
    /// Framebuffer size in pixels
    fn size(&self) -> (u32, u32);

    fn is_key_pressed(&self, key: KeyCode) -> bool;

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool;

    /// Cursor movement since the last `present()`
    fn cursor_delta(&self) -> (f32, f32);

    /// Whether `present()` blocks on vertical sync
    fn vsync(&self) -> bool;

    /// Swap buffers, then poll pending window events
    fn present(&mut self) -> Result<()>;

    /// User asked to close the window
    fn should_close(&self) -> bool;
}

#[cfg(test)]
#[path = "mock_window.rs"]
pub(crate) mod mock_window;
