// Fri Oct 16 2026 - Alex

use crate::memory::{OffsetSet, ViewWidth};
use crate::tracker::{ObservationHistory, SearchStatus};

/// Narrowing state for one tracked quantity: the width it is scanned at and
/// everything observed since the session started.
#[derive(Debug, Clone)]
pub struct Session {
    width: ViewWidth,
    history: ObservationHistory,
    epoch: Option<u64>,
}

impl Session {
    pub fn new(width: ViewWidth) -> Self {
        Self {
            width,
            history: ObservationHistory::new(),
            epoch: None,
        }
    }

    pub fn width(&self) -> ViewWidth {
        self.width
    }

    pub fn history(&self) -> &ObservationHistory {
        &self.history
    }

    /// Buffer epoch the latest observation was scanned from.
    pub fn epoch(&self) -> Option<u64> {
        self.epoch
    }

    /// Records hits scanned from the buffer at `epoch`. Returns the epoch of
    /// the previous observation when it came from a different buffer.
    pub fn record(&mut self, value: i64, offsets: OffsetSet, epoch: u64) -> (SearchStatus, Option<u64>) {
        let replaced = self.epoch.filter(|&previous| previous != epoch);
        self.epoch = Some(epoch);
        (self.history.push(value, offsets), replaced)
    }

    pub fn status(&self) -> SearchStatus {
        self.history.status()
    }

    pub fn candidates(&self) -> OffsetSet {
        self.history.intersection()
    }
}
