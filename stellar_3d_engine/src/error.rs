//! Error types for the Stellar3D engine
//!
//! This module defines the error type used throughout the engine,
//! including rendering, initialization, physics and resource management.
//!
//! Fatal errors (context creation, shader compilation) travel up as `Err`
//! out of constructors. Per-entity failures inside a frame are logged and
//! counted by the renderer instead of being returned.

use std::fmt;

/// Result type for Stellar3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Stellar3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL, mock device, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, buffer, mesh, material, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, window, renderer, subsystems)
    InitializationFailed(String),

    /// Shader compilation or program link failure
    ShaderCompilation(String),

    /// Invalid physics input (collision shape, body handle)
    Physics(String),

    /// Operation called in the wrong lifecycle state
    InvalidState(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::ShaderCompilation(msg) => write!(f, "Shader compilation failed: {}", msg),
            Error::Physics(msg) => write!(f, "Physics error: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an ERROR and build an `Error::BackendError` from the same message
///
/// # Example
///
/// ```ignore
/// let lod = mesh.lod(0).ok_or_else(|| engine_err!("stellar3d::Scene", "Mesh has no LODs"))?;
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::stellar3d::Error::BackendError(message)
    }};
}

/// Log an ERROR and return early with an `Error::BackendError`
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
