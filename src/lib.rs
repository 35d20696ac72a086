// Fri Oct 16 2026 - Alex

//! Candidate-narrowing memory scanner.
//!
//! A tracked quantity lives at one fixed but unknown offset of a live buffer.
//! Each observation scans a typed view of the buffer for the value the
//! quantity is known to hold right now; intersecting the offsets found across
//! observations converges on the one offset that matched every time, which
//! can then be written to.

pub mod config;
pub mod memory;
pub mod tracker;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use memory::{MemoryError, MemorySource, OffsetSet, SharedBuffer, TypedView, ViewAccessor, ViewWidth};
pub use tracker::{CandidateTracker, SearchStatus, TrackerError};
