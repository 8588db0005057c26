/// Stellar3D Engine - process-wide singletons
///
/// Holds the logger and the GPU device. The device is a process-wide
/// resource: it is registered once at startup and only the owning thread
/// issues GPU calls through it.

use std::sync::{OnceLock, RwLock, Arc, Mutex};
use crate::graphics_device::GraphicsDevice;
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (DefaultLogger until replaced)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

struct EngineState {
    graphics_device: RwLock<Option<Arc<Mutex<dyn GraphicsDevice>>>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            graphics_device: RwLock::new(None),
        }
    }
}

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
}

// ===== PUBLIC API =====

/// Engine singleton manager
///
/// # Example
///
/// ```ignore
/// use stellar_3d_engine::stellar3d::Engine;
///
/// Engine::initialize()?;
/// Engine::create_graphics_device(GlDevice::new(&window)?)?;
///
/// let device = Engine::graphics_device()?;
/// let mut device = device.lock().unwrap();
/// // create meshes, renderer...
///
/// Engine::shutdown();
/// ```
pub struct Engine;

impl Engine {
    /// Log an engine error before handing it back to the caller
    fn log_and_return_error(error: Error) -> Error {
        crate::engine_error!("stellar3d::Engine", "{}", error);
        error
    }

    fn state() -> Result<&'static EngineState> {
        ENGINE_STATE.get().ok_or_else(|| Self::log_and_return_error(
            Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
        ))
    }

    /// Initialize the engine. Idempotent.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        crate::engine_debug!("stellar3d::Engine", "Engine initialized");
        Ok(())
    }

    /// Release every singleton
    ///
    /// Call `initialize()` again before registering a new device.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut device) = state.graphics_device.write() {
                if device.take().is_some() {
                    crate::engine_info!("stellar3d::Engine", "Graphics device released");
                }
            }
        }
    }

    // ===== GRAPHICS DEVICE API =====

    /// Register the GPU device singleton
    ///
    /// # Errors
    ///
    /// - the engine is not initialized
    /// - a device is already registered
    pub fn create_graphics_device<D: GraphicsDevice + 'static>(device: D) -> Result<Arc<Mutex<dyn GraphicsDevice>>> {
        let state = Self::state()?;

        let mut lock = state.graphics_device.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Graphics device lock poisoned".to_string())
            ))?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed("Graphics device already exists. Call Engine::destroy_graphics_device() first.".to_string())
            ));
        }

        let device: Arc<Mutex<dyn GraphicsDevice>> = Arc::new(Mutex::new(device));
        *lock = Some(device.clone());

        crate::engine_info!("stellar3d::Engine", "Graphics device registered");
        Ok(device)
    }

    /// Shared handle to the GPU device singleton
    pub fn graphics_device() -> Result<Arc<Mutex<dyn GraphicsDevice>>> {
        let state = Self::state()?;

        let lock = state.graphics_device.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Graphics device lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Graphics device not created. Call Engine::create_graphics_device() first.".to_string())
            ))
    }

    /// Unregister the GPU device. Outstanding handles stay valid until dropped.
    pub fn destroy_graphics_device() -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.graphics_device.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Graphics device lock poisoned".to_string())
            ))?;

        *lock = None;
        crate::engine_info!("stellar3d::Engine", "Graphics device destroyed");
        Ok(())
    }

    /// Reset all singletons (test builds only)
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut device) = state.graphics_device.write() {
                *device = None;
            }
        }
    }

    // ===== LOGGING API =====

    /// Replace the active logger
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(logger_impl);
        }
    }

    /// Restore the `DefaultLogger`
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger::default());
        }
    }

    /// Dispatch a log entry without location (used by `engine_trace!`..`engine_warn!`)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry::new(severity, source, message));
        }
    }

    /// Dispatch a log entry with file:line (used by `engine_error!`)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry::new(severity, source, message).at(file, line));
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
