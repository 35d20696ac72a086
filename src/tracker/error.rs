// Fri Oct 16 2026 - Alex

use crate::memory::MemoryError;
use crate::tracker::SearchStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("No active session for '{0}'")]
    NoActiveSession(String),
    #[error("'{id}' has not converged (status: {status})")]
    NotConverged { id: String, status: SearchStatus },
    #[error("Converged offset {offset} for '{id}' is outside the view of length {len}")]
    OutOfBounds { id: String, offset: usize, len: usize },
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

impl TrackerError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            TrackerError::Memory(e) => e.is_recoverable(),
            _ => false,
        }
    }
}
