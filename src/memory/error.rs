// Fri Oct 16 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Memory buffer is not currently exposed")]
    BufferUnavailable,
    #[error("Unsupported view width: {0} bits (expected 8, 16 or 32)")]
    UnsupportedWidth(u32),
    #[error("Unknown view width name: '{0}'")]
    UnknownWidthName(String),
    #[error("Stale view: opened at epoch {opened}, buffer is now at {current:?}")]
    StaleView { opened: u64, current: Option<u64> },
    #[error("Out of bounds: index {index} not in view of length {len}")]
    OutOfBounds { index: usize, len: usize },
}

impl MemoryError {
    /// Errors the caller can recover from by retrying or re-opening.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MemoryError::BufferUnavailable | MemoryError::StaleView { .. })
    }
}
