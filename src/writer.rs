//! Writer endpoint role
//!
//! Thin wrapper over [`RingBuffer`] that opens the backing region
//! read-write and exposes the producer side of the transport. One process
//! holds the writer, its peer holds a [`RingReader`](crate::RingReader)
//! over the same `(path, offset, size)` triple.

use crate::buffer::{BufferMode, RingBuffer};
use crate::error::RingResult;
use std::path::Path;

/// Read-write endpoint of a mapped ring buffer
pub struct RingWriter {
    buffer: RingBuffer,
}

impl RingWriter {
    /// Open a writer over `size` bytes of `path` starting at `offset`
    ///
    /// The backing file must already exist and be large enough; see
    /// [`RingBuffer::open`] for the full contract and error conditions.
    pub fn open<P: AsRef<Path>>(path: P, offset: u64, size: usize) -> RingResult<Self> {
        let buffer = RingBuffer::open(path, offset, size, BufferMode::ReadWrite)?;
        Ok(Self { buffer })
    }

    /// Append `bytes` at the write cursor, wrapping at the region boundary
    ///
    /// No flow control is applied: writing more than the buffer capacity
    /// without the reader catching up overwrites unread data. See
    /// [`RingBuffer::write`] for error conditions.
    pub fn write(&mut self, bytes: &[u8]) -> RingResult<()> {
        self.buffer.write(bytes)
    }

    /// Read back `len` bytes at the write cursor
    ///
    /// Mostly useful for verification; the cursor advances as with any
    /// read.
    pub fn read_back(&mut self, len: usize) -> RingResult<&[u8]> {
        self.buffer.read(len)
    }

    /// Ask the OS to write dirty pages back to the backing file
    pub fn flush(&self) -> RingResult<()> {
        self.buffer.flush()
    }

    /// Release the mapping and file handle, reporting teardown errors
    pub fn close(self) -> RingResult<()> {
        self.buffer.close()
    }

    /// Logical write cursor position
    pub fn position(&self) -> u64 {
        self.buffer.position()
    }

    /// Move the write cursor
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
