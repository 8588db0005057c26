/// Scriptable window for tests

use rustc_hash::FxHashSet;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;
use crate::error::Result;
use super::Window;

#[derive(Debug)]
pub struct MockWindow {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub pressed_keys: FxHashSet<KeyCode>,
    pub pressed_buttons: Vec<MouseButton>,
    pub cursor_delta: (f32, f32),
    pub presents: usize,
    /// `should_close()` turns true after this many presents
    pub close_after: Option<usize>,
}

impl MockWindow {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            vsync: true,
            pressed_keys: FxHashSet::default(),
            pressed_buttons: Vec::new(),
            cursor_delta: (0.0, 0.0),
            presents: 0,
            close_after: None,
        }
    }
}

impl Window for MockWindow {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    fn cursor_delta(&self) -> (f32, f32) {
        self.cursor_delta
    }

    fn vsync(&self) -> bool {
        self.vsync
    }

    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.close_after.is_some_and(|n| self.presents >= n)
    }
}
