// Fri Oct 16 2026 - Alex

use crate::memory::{MemoryError, MemorySource, OffsetSet, ViewWidth};
use std::fmt;
use std::sync::Arc;

/// Fixed-width signed projection of the shared buffer. Holds no copy of the
/// bytes; every access goes through the source and is rejected once the
/// buffer the view was opened on has been detached or replaced.
#[derive(Clone)]
pub struct TypedView {
    source: Arc<dyn MemorySource>,
    width: ViewWidth,
    epoch: u64,
    len: usize,
}

impl TypedView {
    pub(crate) fn open(source: Arc<dyn MemorySource>, width: ViewWidth) -> Result<Self, MemoryError> {
        let epoch = source.epoch().ok_or(MemoryError::BufferUnavailable)?;

        let mut byte_len = 0;
        source.with_bytes(epoch, &mut |bytes: &[u8]| byte_len = bytes.len())?;
        if byte_len == 0 {
            return Err(MemoryError::BufferUnavailable);
        }

        Ok(Self {
            source,
            width,
            epoch,
            len: byte_len / width.size(),
        })
    }

    pub fn width(&self) -> ViewWidth {
        self.width
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_stale(&self) -> bool {
        self.source.epoch() != Some(self.epoch)
    }

    fn check_index(&self, index: usize) -> Result<usize, MemoryError> {
        if index >= self.len {
            return Err(MemoryError::OutOfBounds { index, len: self.len });
        }
        Ok(index * self.width.size())
    }

    pub fn get(&self, index: usize) -> Result<i32, MemoryError> {
        let start = self.check_index(index)?;
        let size = self.width.size();
        let width = self.width;

        let mut value = 0;
        self.source.with_bytes(self.epoch, &mut |bytes: &[u8]| {
            value = width.decode(&bytes[start..start + size]);
        })?;
        Ok(value)
    }

    /// Writes `value`, truncated to the view width, at `index`.
    pub fn set(&self, index: usize, value: i64) -> Result<(), MemoryError> {
        let start = self.check_index(index)?;
        let size = self.width.size();
        let width = self.width;
        let wrapped = width.wrap(value);

        self.source.with_bytes_mut(self.epoch, &mut |bytes: &mut [u8]| {
            width.encode(wrapped, &mut bytes[start..start + size]);
        })
    }

    /// Every index whose element equals `value` at this width.
    pub fn scan(&self, value: i64) -> Result<OffsetSet, MemoryError> {
        let target = self.width.wrap(value);
        let width = self.width;
        let len = self.len;

        let mut hits = Vec::new();
        self.source.with_bytes(self.epoch, &mut |bytes: &[u8]| {
            hits.extend(
                bytes
                    .chunks_exact(width.size())
                    .take(len)
                    .enumerate()
                    .filter(|(_, chunk)| width.decode(chunk) == target)
                    .map(|(index, _)| index),
            );
        })?;

        Ok(OffsetSet::from_sorted(hits))
    }
}

impl fmt::Debug for TypedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedView")
            .field("width", &self.width)
            .field("epoch", &self.epoch)
            .field("len", &self.len)
            .finish()
    }
}
