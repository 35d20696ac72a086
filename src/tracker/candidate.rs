// Fri Oct 16 2026 - Alex

use crate::memory::{MemorySource, OffsetSet, TypedView, ViewAccessor, ViewWidth};
use crate::tracker::{SearchStatus, Session, TrackerError};
use indexmap::IndexMap;
use std::sync::Arc;

/// Narrows each tracked quantity down to the one offset that keeps matching
/// the values the operator reports for it.
///
/// Sessions are independent: every quantity id owns its own width and
/// observation history, and starting one never touches another.
pub struct CandidateTracker {
    accessor: ViewAccessor,
    sessions: IndexMap<String, Session>,
}

impl CandidateTracker {
    pub fn new(accessor: ViewAccessor) -> Self {
        Self {
            accessor,
            sessions: IndexMap::new(),
        }
    }

    pub fn from_source(source: Arc<dyn MemorySource>) -> Self {
        Self::new(ViewAccessor::new(source))
    }

    fn session(&self, id: &str) -> Result<&Session, TrackerError> {
        self.sessions
            .get(id)
            .ok_or_else(|| TrackerError::NoActiveSession(id.to_string()))
    }

    /// Starts (or restarts) narrowing for `id` at `bits` width, discarding
    /// any earlier history for it.
    pub fn start_session(&mut self, id: &str, bits: u32) -> Result<(), TrackerError> {
        let width = ViewWidth::from_bits(bits)?;
        self.start_session_with(id, width);
        Ok(())
    }

    pub fn start_session_with(&mut self, id: &str, width: ViewWidth) {
        let previous = self.sessions.insert(id.to_string(), Session::new(width));
        match previous {
            Some(old) => log::info!(
                "Restarted session '{}' at {} (discarded {} observations)",
                id,
                width,
                old.history().len()
            ),
            None => log::info!("Started session '{}' at {}", id, width),
        }
    }

    pub fn end_session(&mut self, id: &str) -> bool {
        self.sessions.shift_remove(id).is_some()
    }

    /// Scans for `expected`, records the hits and reports where the search
    /// stands across everything observed for `id` so far.
    ///
    /// Offsets are element indices, so hits from a replacement buffer are
    /// still intersected with the earlier ones. A warning is logged when the
    /// buffer changed since the previous observation of `id`.
    pub fn observe(&mut self, id: &str, expected: i64) -> Result<SearchStatus, TrackerError> {
        let width = self.session(id)?.width();
        let view = self.accessor.open(width)?;
        let hits = self.accessor.scan_for_value(&view, expected)?;
        let hit_count = hits.len();

        let session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| TrackerError::NoActiveSession(id.to_string()))?;
        let (status, replaced) = session.record(expected, hits, view.epoch());
        let observations = session.history().len();

        if let Some(previous) = replaced {
            log::warn!(
                "'{}' observation #{}: buffer was replaced (epoch {} -> {}), earlier candidates came from the old buffer",
                id,
                observations,
                previous,
                view.epoch()
            );
        }

        match status {
            SearchStatus::Converged { offset } => log::info!(
                "'{}' converged at element {} (byte 0x{:x}) after {} observations",
                id,
                offset,
                offset * width.size(),
                observations
            ),
            SearchStatus::Narrowing { candidate_count } => log::debug!(
                "'{}' observation #{}: {} hits, {} candidates remain",
                id,
                observations,
                hit_count,
                candidate_count
            ),
            SearchStatus::NoMatch => log::warn!(
                "'{}' observation #{}: no offset holds {}",
                id,
                observations,
                width.wrap(expected)
            ),
            SearchStatus::Ambiguous => log::warn!(
                "'{}' observation #{}: {} hits but no offset matches every observation",
                id,
                observations,
                hit_count
            ),
            SearchStatus::Pending => {}
        }

        Ok(status)
    }

    fn converged_view(&self, id: &str) -> Result<(TypedView, usize), TrackerError> {
        let session = self.session(id)?;
        let status = session.status();
        let offset = status.converged_offset().ok_or_else(|| TrackerError::NotConverged {
            id: id.to_string(),
            status,
        })?;

        // The buffer may have been replaced by a shorter one since convergence.
        let view = self.accessor.open(session.width())?;
        if offset >= view.len() {
            return Err(TrackerError::OutOfBounds {
                id: id.to_string(),
                offset,
                len: view.len(),
            });
        }
        Ok((view, offset))
    }

    /// Writes `value` at the converged offset of `id`.
    pub fn commit(&mut self, id: &str, value: i64) -> Result<(), TrackerError> {
        let (view, offset) = self.converged_view(id)?;
        view.set(offset, value)?;

        log::info!(
            "Committed {} to '{}' at element {}",
            view.width().wrap(value),
            id,
            offset
        );
        Ok(())
    }

    /// Reads what currently sits at the converged offset of `id`.
    pub fn read_converged(&self, id: &str) -> Result<i32, TrackerError> {
        let (view, offset) = self.converged_view(id)?;
        Ok(view.get(offset)?)
    }

    pub fn status(&self, id: &str) -> Result<SearchStatus, TrackerError> {
        Ok(self.session(id)?.status())
    }

    pub fn candidates(&self, id: &str) -> Result<OffsetSet, TrackerError> {
        Ok(self.session(id)?.candidates())
    }

    pub fn observation_count(&self, id: &str) -> Result<usize, TrackerError> {
        Ok(self.session(id)?.history().len())
    }

    pub fn width(&self, id: &str) -> Result<ViewWidth, TrackerError> {
        Ok(self.session(id)?.width())
    }

    pub fn get_session(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn sessions(&self) -> impl Iterator<Item = (&str, &Session)> {
        self.sessions.iter().map(|(id, session)| (id.as_str(), session))
    }
}
