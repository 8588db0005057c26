/// Buffer trait and buffer descriptor

use crate::error::Result;

/// Buffer usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    /// Per-vertex attribute data
    Vertex,
    /// Triangle indices (u32)
    Index,
    /// Per-instance attribute data, rewritten every draw
    Instance,
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    /// Buffer usage
    pub usage: BufferUsage,
}

/// GPU buffer
///
/// Destroyed when the last reference is dropped.
pub trait Buffer: Send + Sync {
    /// Size in bytes
    fn size(&self) -> u64;

    /// Usage the buffer was created with
    fn usage(&self) -> BufferUsage;

    /// Write `data` starting at byte `offset`
    ///
    /// # Errors
    ///
    /// Fails if `offset + data.len()` exceeds the buffer size.
    fn update(&self, offset: u64, data: &[u8]) -> Result<()>;
}
