// Fri Oct 16 2026 - Alex

pub mod candidate;
pub mod error;
pub mod history;
pub mod session;
pub mod status;

pub use candidate::CandidateTracker;
pub use error::TrackerError;
pub use history::{Observation, ObservationHistory};
pub use session::Session;
pub use status::SearchStatus;
