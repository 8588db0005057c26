/// Game loop - fixed-rate updates, variable-rate rendering
///
/// Each frame: input, as many fixed `update` steps as the elapsed time
/// allows, one `render`, then `Window::present()`. When vsync is off the
/// loop sleeps to hold `target_fps`.

use std::time::{Duration, Instant};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::window::Window;
use crate::{engine_debug, engine_error, engine_info, engine_trace};

/// Upper bound on fixed updates run in a single frame
pub const MAX_UPDATES_PER_FRAME: u32 = 10;

/// Game callbacks driven by `GameLoop`
pub trait GameLogic {
    /// Called once before the first frame
    fn init(&mut self, window: &mut dyn Window) -> Result<()>;

    /// Read the input state of this frame
    fn input(&mut self, window: &dyn Window);

    /// Advance the game by `interval` seconds
    fn update(&mut self, interval: f32);

    /// Draw the current state (physics, culling and passes run in here)
    fn render(&mut self, window: &mut dyn Window) -> Result<()>;

    /// Called once after the last frame, even when the loop failed
    fn cleanup(&mut self) {}
}

/// Wall-clock time between loop iterations
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    last_loop_time: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self { last_loop_time: Instant::now() }
    }

    /// Seconds since the previous call (or creation), then restart
    pub fn elapsed(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_loop_time).as_secs_f32();
        self.last_loop_time = now;
        elapsed
    }

    pub fn last_loop_time(&self) -> Instant {
        self.last_loop_time
    }
}

/// What one `GameLoop::frame` did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub updates: u32,
    pub rendered: bool,
}

pub struct GameLoop {
    update_interval: f32,
    frame_interval: Duration,
    accumulator: f32,
    timer: Timer,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            update_interval: 1.0 / config.target_ups.max(1) as f32,
            frame_interval: Duration::from_secs_f32(1.0 / config.target_fps.max(1) as f32),
            accumulator: 0.0,
            timer: Timer::new(),
            frame_count: 0,
            update_count: 0,
        }
    }

    pub fn update_interval(&self) -> f32 {
        self.update_interval
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Time not yet consumed by fixed updates
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Run until the window asks to close
    ///
    /// `cleanup` runs on every exit path.
    pub fn run(&mut self, window: &mut dyn Window, logic: &mut dyn GameLogic) -> Result<()> {
        let result = self.run_frames(window, logic);
        logic.cleanup();
        engine_info!("stellar3d::GameLoop", "Game loop stopped after {} frames", self.frame_count);
        result
    }

    fn run_frames(&mut self, window: &mut dyn Window, logic: &mut dyn GameLogic) -> Result<()> {
        logic.init(window)?;
        self.timer = Timer::new();
        engine_debug!("stellar3d::GameLoop", "Game loop started ({:.4}s updates)", self.update_interval);

        while !window.should_close() {
            let frame_start = Instant::now();
            let elapsed = self.timer.elapsed();
            self.frame(window, logic, elapsed)?;
            if !window.vsync() {
                sync(frame_start, self.frame_interval);
            }
        }
        Ok(())
    }

    /// One loop iteration with `elapsed` seconds since the previous one
    ///
    /// Render errors are logged and the frame is still presented.
    pub fn frame(
        &mut self,
        window: &mut dyn Window,
        logic: &mut dyn GameLogic,
        elapsed: f32,
    ) -> Result<FrameReport> {
        self.accumulator += elapsed.max(0.0);
        logic.input(window);

        let mut updates = 0;
        while self.accumulator >= self.update_interval {
            if updates == MAX_UPDATES_PER_FRAME {
                engine_trace!("stellar3d::GameLoop",
                    "Dropping {:.4}s of update backlog", self.accumulator);
                self.accumulator %= self.update_interval;
                break;
            }
            logic.update(self.update_interval);
            self.accumulator -= self.update_interval;
            updates += 1;
        }
        self.update_count += updates as u64;

        let rendered = match logic.render(window) {
            Ok(()) => true,
            Err(e) => {
                engine_error!("stellar3d::GameLoop", "Frame {} render failed: {}", self.frame_count, e);
                false
            }
        };

        window.present()?;
        self.frame_count += 1;
        Ok(FrameReport { updates, rendered })
    }
}

/// Sleep until `frame_start + frame_interval`
fn sync(frame_start: Instant, frame_interval: Duration) {
    let end = frame_start + frame_interval;
    let now = Instant::now();
    if now < end {
        std::thread::sleep(end - now);
    }
}

#[cfg(test)]
#[path = "game_loop_tests.rs"]
mod tests;
