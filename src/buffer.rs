//! Ring buffer descriptor and wraparound data paths

use crate::error::{RingError, RingResult};
use crate::platform::{map_readonly, map_readwrite, validate_offset_alignment};
use memmap2::{Mmap, MmapMut};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Access mode of a buffer endpoint, fixed at open time
///
/// The mode selects both the open flags for the backing file and the
/// protection of the mapping, and is re-checked on every mutating call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferMode {
    /// Reader endpoint: file opened read-only, mapping protection read-only
    ReadOnly,
    /// Writer endpoint: file opened read-write, mapping protection read-write
    ReadWrite,
}

/// Mapping variant keyed by mode
///
/// The read-only variant holds an immutable mapping, so a reader endpoint
/// cannot write through its view even with unsafe-free code paths.
enum Region {
    Ro(Mmap),
    Rw(MmapMut),
}

impl Region {
    fn as_slice(&self) -> &[u8] {
        match self {
            Region::Ro(map) => &map[..],
            Region::Rw(map) => &map[..],
        }
    }

    fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        match self {
            Region::Ro(_) => None,
            Region::Rw(map) => Some(&mut map[..]),
        }
    }
}

/// Memory-mapped circular buffer over a fixed region of a backing file
///
/// The descriptor owns its mapping and file handle exclusively; both are
/// released exactly once, either by [`RingBuffer::close`] or on drop. The
/// backing storage itself is shared data: one process typically holds a
/// [`BufferMode::ReadWrite`] descriptor and another a
/// [`BufferMode::ReadOnly`] descriptor over the same `(path, offset, size)`
/// region.
///
/// A logical cursor advances monotonically with every read or write; the
/// physical offset into the mapped region is `cursor % size`, so operations
/// that cross the end of the region wrap to its start. The buffer performs
/// no flow control: writing more than `size` unread bytes overwrites data
/// the peer has not consumed, and keeping the two endpoints' cursors in
/// step is the caller's responsibility.
pub struct RingBuffer {
    /// Backing file path
    path: PathBuf,
    /// Mapping offset into the backing file
    offset: u64,
    /// Capacity of the mapped region in bytes
    size: usize,
    /// Access mode, fixed at creation
    mode: BufferMode,
    /// Mapped view of the file region; declared before `file` so the region
    /// is unmapped before the handle is released
    region: Region,
    /// Backing file handle, held for the descriptor's lifetime
    file: File,
    /// Logical cursor position since open (or the last `set_position`)
    position: u64,
    /// Reusable copy-out buffer for reads
    read_buf: Vec<u8>,
}

impl RingBuffer {
    /// Open a descriptor over `size` bytes of `path` starting at `offset`
    ///
    /// The backing file must already exist and cover at least
    /// `offset + size` bytes; this call never creates or resizes it.
    /// `offset` must be a multiple of the page size. Construction is
    /// all-or-nothing: if the mapping cannot be established, the file
    /// handle opened along the way is released before the error is
    /// returned.
    ///
    /// # Errors
    /// [`RingError::InvalidSize`] for a zero size, [`RingError::Misaligned`]
    /// for an unaligned offset, [`RingError::Open`] if the file cannot be
    /// opened with the access the mode requires, [`RingError::Map`] if the
    /// mapping fails or the region extends past the end of the file.
    pub fn open<P: AsRef<Path>>(
        path: P,
        offset: u64,
        size: usize,
        mode: BufferMode,
    ) -> RingResult<Self> {
        let path = path.as_ref();

        if size == 0 {
            return Err(RingError::InvalidSize { size });
        }
        validate_offset_alignment(offset)?;

        let (file, region) = match mode {
            BufferMode::ReadOnly => {
                let (file, map) = map_readonly(path, offset, size)?;
                (file, Region::Ro(map))
            }
            BufferMode::ReadWrite => {
                let (file, map) = map_readwrite(path, offset, size)?;
                (file, Region::Rw(map))
            }
        };

        tracing::debug!(
            path = %path.display(),
            offset,
            size,
            mode = ?mode,
            "Mapped ring buffer"
        );

        Ok(Self {
            path: path.to_path_buf(),
            offset,
            size,
            mode,
            region,
            file,
            position: 0,
            read_buf: Vec::new(),
        })
    }

    /// Copy `bytes` into the buffer at the current cursor, wrapping at the
    /// end of the region
    ///
    /// A zero-length write is a successful no-op. On any error the cursor
    /// is left unchanged and the descriptor remains usable.
    ///
    /// # Errors
    /// [`RingError::Mode`] on a read-only descriptor,
    /// [`RingError::SizeExceeded`] if `bytes` is longer than the whole
    /// buffer (such a write would alias over itself with no well-defined
    /// result).
    pub fn write(&mut self, bytes: &[u8]) -> RingResult<()> {
        if self.mode != BufferMode::ReadWrite {
            return Err(RingError::Mode { op: "write" });
        }
        if bytes.len() > self.size {
            return Err(RingError::SizeExceeded {
                requested: bytes.len(),
                capacity: self.size,
            });
        }
        if bytes.is_empty() {
            return Ok(());
        }

        let size = self.size;
        let pos = (self.position % size as u64) as usize;
        let data = match self.region.as_mut_slice() {
            Some(data) => data,
            None => return Err(RingError::Mode { op: "write" }),
        };

        let first = bytes.len().min(size - pos);
        data[pos..pos + first].copy_from_slice(&bytes[..first]);
        if first < bytes.len() {
            // Wrap the remainder to the start of the region
            data[..bytes.len() - first].copy_from_slice(&bytes[first..]);
        }

        self.position += bytes.len() as u64;
        Ok(())
    }

    /// Copy `len` bytes out of the buffer at the current cursor, wrapping
    /// at the end of the region
    ///
    /// Works on either mode; a writer may read back what it wrote. The
    /// returned slice borrows an internal buffer and stays valid until the
    /// next read. A zero-length read is a successful no-op returning an
    /// empty slice. On error the cursor is left unchanged.
    ///
    /// # Errors
    /// [`RingError::SizeExceeded`] if `len` is larger than the whole
    /// buffer.
    pub fn read(&mut self, len: usize) -> RingResult<&[u8]> {
        if len > self.size {
            return Err(RingError::SizeExceeded {
                requested: len,
                capacity: self.size,
            });
        }
        if self.read_buf.len() < len {
            self.read_buf.resize(len, 0);
        }

        let size = self.size;
        let pos = (self.position % size as u64) as usize;
        let data = self.region.as_slice();

        let first = len.min(size - pos);
        self.read_buf[..first].copy_from_slice(&data[pos..pos + first]);
        if first < len {
            self.read_buf[first..len].copy_from_slice(&data[..len - first]);
        }

        self.position += len as u64;
        Ok(&self.read_buf[..len])
    }

    /// Ask the OS to write dirty pages back to the backing file
    ///
    /// # Errors
    /// [`RingError::Mode`] on a read-only descriptor, [`RingError::Flush`]
    /// if the writeback fails.
    pub fn flush(&self) -> RingResult<()> {
        match &self.region {
            Region::Rw(map) => map.flush().map_err(|source| RingError::Flush { source }),
            Region::Ro(_) => Err(RingError::Mode { op: "flush" }),
        }
    }

    /// Release the mapping and the file handle, in that order
    ///
    /// Consuming the descriptor makes a second close or a use-after-close
    /// unrepresentable. For a read-write descriptor the mapping is flushed
    /// first and a flush failure is reported, but teardown proceeds
    /// regardless: resources are released exactly once whether or not this
    /// returns an error. Dropping the descriptor without calling `close`
    /// releases the same resources, just without the error channel.
    pub fn close(self) -> RingResult<()> {
        let RingBuffer {
            path, region, file, ..
        } = self;

        let result = match &region {
            Region::Rw(map) => map.flush().map_err(|source| RingError::Close { source }),
            Region::Ro(_) => Ok(()),
        };

        drop(region);
        drop(file);

        tracing::debug!(path = %path.display(), "Closed ring buffer");
        result
    }

    /// Logical cursor position
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Move the logical cursor
    ///
    /// The physical offset is always `position % size`, so any value is
    /// valid. Two endpoints coordinate their cursors through whatever
    /// handshake the caller provides; this crate imposes none.
    pub fn set_position(&mut self, position: u64) {
        self.position = position;
    }

    /// Capacity of the mapped region in bytes
    pub fn capacity(&self) -> usize {
        self.size
    }

    /// Access mode of this descriptor
    pub fn mode(&self) -> BufferMode {
        self.mode
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mapping offset into the backing file
    pub fn offset(&self) -> u64 {
        self.offset
    }
}
