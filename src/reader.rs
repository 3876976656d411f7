//! Reader endpoint role
//!
//! Thin wrapper over [`RingBuffer`] that opens the backing region
//! read-only. The mapping is shared and file-backed, so stores made by the
//! peer [`RingWriter`](crate::RingWriter) become visible through this
//! endpoint's view; when and in what order is up to the synchronization
//! the caller layers on top.

use crate::buffer::{BufferMode, RingBuffer};
use crate::error::RingResult;
use std::path::Path;

/// Read-only endpoint of a mapped ring buffer
pub struct RingReader {
    buffer: RingBuffer,
}

impl RingReader {
    /// Open a reader over `size` bytes of `path` starting at `offset`
    ///
    /// The backing file must already exist and be large enough; see
    /// [`RingBuffer::open`] for the full contract and error conditions.
    pub fn open<P: AsRef<Path>>(path: P, offset: u64, size: usize) -> RingResult<Self> {
        let buffer = RingBuffer::open(path, offset, size, BufferMode::ReadOnly)?;
        Ok(Self { buffer })
    }

    /// Copy `len` bytes out at the read cursor, wrapping at the region
    /// boundary
    ///
    /// The returned slice stays valid until the next read. See
    /// [`RingBuffer::read`] for error conditions.
    pub fn read(&mut self, len: usize) -> RingResult<&[u8]> {
        self.buffer.read(len)
    }

    /// Release the mapping and file handle, reporting teardown errors
    pub fn close(self) -> RingResult<()> {
        self.buffer.close()
    }

    /// Logical read cursor position
    pub fn position(&self) -> u64 {
        self.buffer.position()
    }

    /// Move the read cursor
    pub fn set_position(&mut self, position: u64) {
        self.buffer.set_position(position);
    }

    /// Buffer capacity in bytes
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        self.buffer.path()
    }
}
