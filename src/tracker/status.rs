// Fri Oct 16 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of the observations accumulated for one tracked quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchStatus {
    /// Session started, nothing observed yet.
    Pending,
    /// The latest observation matched no offset at all.
    NoMatch,
    Narrowing { candidate_count: usize },
    Converged { offset: usize },
    /// Every observation matched something but no offset matched them all.
    Ambiguous,
}

impl SearchStatus {
    pub fn is_converged(&self) -> bool {
        matches!(self, SearchStatus::Converged { .. })
    }

    pub fn converged_offset(&self) -> Option<usize> {
        match self {
            SearchStatus::Converged { offset } => Some(*offset),
            _ => None,
        }
    }

    /// NoMatch and Ambiguous cannot recover without a fresh session.
    pub fn is_dead_end(&self) -> bool {
        matches!(self, SearchStatus::NoMatch | SearchStatus::Ambiguous)
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStatus::Pending => write!(f, "pending"),
            SearchStatus::NoMatch => write!(f, "no match"),
            SearchStatus::Narrowing { candidate_count } => {
                write!(f, "narrowing ({} candidates)", candidate_count)
            }
            SearchStatus::Converged { offset } => write!(f, "converged at {}", offset),
            SearchStatus::Ambiguous => write!(f, "ambiguous"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converged_offset() {
        assert_eq!(SearchStatus::Converged { offset: 4 }.converged_offset(), Some(4));
        assert_eq!(SearchStatus::Narrowing { candidate_count: 2 }.converged_offset(), None);
        assert!(!SearchStatus::Pending.is_converged());
    }

    #[test]
    fn test_display() {
        assert_eq!(SearchStatus::Narrowing { candidate_count: 3 }.to_string(), "narrowing (3 candidates)");
        assert_eq!(SearchStatus::Converged { offset: 4 }.to_string(), "converged at 4");
        assert_eq!(SearchStatus::Ambiguous.to_string(), "ambiguous");
    }
}
