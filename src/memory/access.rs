// Fri Oct 16 2026 - Alex

use crate::memory::{MemoryError, MemorySource, OffsetSet, TypedView, ViewWidth};
use std::sync::Arc;
use std::time::Instant;

/// Opens typed views over the externally owned buffer and scans them.
#[derive(Clone)]
pub struct ViewAccessor {
    source: Arc<dyn MemorySource>,
}

impl ViewAccessor {
    pub fn new(source: Arc<dyn MemorySource>) -> Self {
        Self { source }
    }

    pub fn is_available(&self) -> bool {
        self.source.epoch().is_some() && self.source.byte_len() > 0
    }

    /// Opens a view of `bits` width (8, 16 or 32) bound to the current buffer.
    pub fn open_view(&self, bits: u32) -> Result<TypedView, MemoryError> {
        let width = ViewWidth::from_bits(bits)?;
        self.open(width)
    }

    pub fn open(&self, width: ViewWidth) -> Result<TypedView, MemoryError> {
        TypedView::open(self.source.clone(), width)
    }

    pub fn scan_for_value(&self, view: &TypedView, value: i64) -> Result<OffsetSet, MemoryError> {
        let start = Instant::now();
        let hits = view.scan(value)?;
        log::debug!(
            "Scanned {} {} elements for {} ({} hits, {:?})",
            view.len(),
            view.width(),
            view.width().wrap(value),
            hits.len(),
            start.elapsed()
        );
        Ok(hits)
    }
}
