// Fri Oct 16 2026 - Alex

use crate::memory::MemoryError;
use memmap2::MmapMut;
use parking_lot::RwLock;
use std::fs::OpenOptions;
use std::path::Path;

/// The single capability the scanner consumes from whatever owns the memory:
/// the current raw buffer, or a signal that nothing is exposed.
///
/// Every attach, detach or replacement of the backing storage bumps the
/// epoch. Views remember the epoch they were opened at and pass it back on
/// every access; a mismatch means the view is stale.
pub trait MemorySource: Send + Sync {
    fn epoch(&self) -> Option<u64>;

    fn byte_len(&self) -> usize;

    fn with_bytes(&self, epoch: u64, f: &mut dyn FnMut(&[u8])) -> Result<(), MemoryError>;

    fn with_bytes_mut(&self, epoch: u64, f: &mut dyn FnMut(&mut [u8])) -> Result<(), MemoryError>;
}

enum Backing {
    Owned(Vec<u8>),
    Mapped(MmapMut),
}

impl Backing {
    fn as_slice(&self) -> &[u8] {
        match self {
            Backing::Owned(bytes) => bytes.as_slice(),
            Backing::Mapped(mmap) => &mmap[..],
        }
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Backing::Owned(bytes) => bytes.as_mut_slice(),
            Backing::Mapped(mmap) => &mut mmap[..],
        }
    }
}

struct Slot {
    backing: Option<Backing>,
    epoch: u64,
}

impl Slot {
    fn current(&self) -> Option<u64> {
        self.backing.as_ref().map(|_| self.epoch)
    }

    fn check(&self, opened: u64) -> Result<(), MemoryError> {
        let current = self.current();
        if current != Some(opened) {
            return Err(MemoryError::StaleView { opened, current });
        }
        Ok(())
    }
}

/// Process-local memory buffer that an external mapper attaches, mutates and
/// detaches between scanner calls. Backed by owned bytes or a writable file
/// mapping.
pub struct SharedBuffer {
    slot: RwLock<Slot>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(Slot { backing: None, epoch: 0 }),
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let buffer = Self::new();
        buffer.attach_bytes(bytes);
        buffer
    }

    pub fn attach_bytes(&self, bytes: Vec<u8>) -> u64 {
        self.install(Some(Backing::Owned(bytes)))
    }

    pub fn attach_file<P: AsRef<Path>>(&self, path: P) -> Result<u64, MemoryError> {
        let path = path.as_ref();
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let mmap = unsafe { MmapMut::map_mut(&file) }?;
        log::info!("Mapped {} ({} bytes)", path.display(), mmap.len());
        Ok(self.install(Some(Backing::Mapped(mmap))))
    }

    pub fn detach(&self) -> u64 {
        self.install(None)
    }

    fn install(&self, backing: Option<Backing>) -> u64 {
        let mut slot = self.slot.write();
        slot.backing = backing;
        slot.epoch += 1;
        slot.epoch
    }

    pub fn is_attached(&self) -> bool {
        self.slot.read().backing.is_some()
    }

    /// Mutates the live bytes in place, as the owning process would.
    pub fn modify<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> Result<R, MemoryError> {
        let mut slot = self.slot.write();
        match slot.backing.as_mut() {
            Some(backing) => Ok(f(backing.as_mut_slice())),
            None => Err(MemoryError::BufferUnavailable),
        }
    }

    pub fn flush(&self) -> Result<(), MemoryError> {
        let slot = self.slot.read();
        if let Some(Backing::Mapped(mmap)) = slot.backing.as_ref() {
            mmap.flush()?;
        }
        Ok(())
    }
}

impl Default for SharedBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySource for SharedBuffer {
    fn epoch(&self) -> Option<u64> {
        self.slot.read().current()
    }

    fn byte_len(&self) -> usize {
        self.slot
            .read()
            .backing
            .as_ref()
            .map(|b| b.as_slice().len())
            .unwrap_or(0)
    }

    fn with_bytes(&self, epoch: u64, f: &mut dyn FnMut(&[u8])) -> Result<(), MemoryError> {
        let slot = self.slot.read();
        slot.check(epoch)?;
        if let Some(backing) = slot.backing.as_ref() {
            f(backing.as_slice());
        }
        Ok(())
    }

    fn with_bytes_mut(&self, epoch: u64, f: &mut dyn FnMut(&mut [u8])) -> Result<(), MemoryError> {
        let mut slot = self.slot.write();
        slot.check(epoch)?;
        if let Some(backing) = slot.backing.as_mut() {
            f(backing.as_mut_slice());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detached_by_default() {
        let buffer = SharedBuffer::new();
        assert!(!buffer.is_attached());
        assert_eq!(buffer.epoch(), None);
        assert_eq!(buffer.byte_len(), 0);
        assert!(matches!(buffer.modify(|_| ()), Err(MemoryError::BufferUnavailable)));
    }

    #[test]
    fn test_epoch_bumps_on_every_transition() {
        let buffer = SharedBuffer::from_bytes(vec![1, 2, 3]);
        let first = buffer.epoch().unwrap();
        let detached = buffer.detach();
        assert!(detached > first);
        assert_eq!(buffer.epoch(), None);
        let second = buffer.attach_bytes(vec![4]);
        assert!(second > detached);
        assert_eq!(buffer.epoch(), Some(second));
    }

    #[test]
    fn test_stale_epoch_rejected() {
        let buffer = SharedBuffer::from_bytes(vec![0; 4]);
        let epoch = buffer.epoch().unwrap();
        buffer.attach_bytes(vec![0; 4]);

        let result = buffer.with_bytes(epoch, &mut |_: &[u8]| {});
        assert!(matches!(result, Err(MemoryError::StaleView { opened, .. }) if opened == epoch));

        buffer.detach();
        let result = buffer.with_bytes_mut(epoch, &mut |_: &mut [u8]| {});
        assert!(matches!(result, Err(MemoryError::StaleView { current: None, .. })));
    }

    #[test]
    fn test_modify_writes_through() {
        let buffer = SharedBuffer::from_bytes(vec![0; 4]);
        buffer.modify(|bytes| bytes[2] = 7).unwrap();

        let epoch = buffer.epoch().unwrap();
        let mut seen = Vec::new();
        buffer.with_bytes(epoch, &mut |bytes: &[u8]| seen.extend_from_slice(bytes)).unwrap();
        assert_eq!(seen, vec![0, 0, 7, 0]);
    }

    #[test]
    fn test_file_mapping_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[5, 0, 9, 0]).unwrap();
        file.flush().unwrap();

        let buffer = SharedBuffer::new();
        let epoch = buffer.attach_file(file.path()).unwrap();
        assert_eq!(buffer.byte_len(), 4);

        buffer.with_bytes_mut(epoch, &mut |bytes: &mut [u8]| bytes[0] = 42).unwrap();
        buffer.flush().unwrap();
        buffer.detach();

        let on_disk = std::fs::read(file.path()).unwrap();
        assert_eq!(on_disk, vec![42, 0, 9, 0]);
    }
}
