//! Unix mapping establishment
//!
//! Opens a backing file and maps a region of it in one step. The mapping is
//! always `MAP_SHARED` and file-backed, so stores made through a read-write
//! mapping are visible to a concurrently held read-only mapping of the same
//! file region in another process.

use crate::error::{RingError, RingResult};
use memmap2::{Mmap, MmapMut, MmapOptions};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// System page size, the granularity mmap offsets must honor
pub fn page_size() -> u64 {
    // sysconf(_SC_PAGESIZE) cannot fail on any supported platform
    unsafe { libc::sysconf(libc::_SC_PAGESIZE) as u64 }
}

/// Reject offsets the kernel would refuse at mmap time
pub fn validate_offset_alignment(offset: u64) -> RingResult<()> {
    let alignment = page_size();
    if offset % alignment != 0 {
        return Err(RingError::Misaligned { offset, alignment });
    }
    Ok(())
}

/// Open the backing file read-only and map `size` bytes at `offset`
///
/// The file handle is returned alongside the mapping so the caller controls
/// when it is released. On a mapping failure the handle opened here is
/// dropped before the error propagates, so no descriptor leaks.
pub fn map_readonly(path: &Path, offset: u64, size: usize) -> RingResult<(File, Mmap)> {
    let file = OpenOptions::new()
        .read(true)
        .open(path)
        .map_err(|source| RingError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    validate_region_in_file(&file, path, offset, size)?;

    let mmap = unsafe { MmapOptions::new().offset(offset).len(size).map(&file) }.map_err(
        |source| RingError::Map {
            path: path.to_path_buf(),
            offset,
            size,
            source,
        },
    )?;

    Ok((file, mmap))
}

/// Open the backing file read-write and map `size` bytes at `offset`
///
/// Same resource discipline as [`map_readonly`]: all-or-nothing, nothing
/// leaks on the failure path.
pub fn map_readwrite(path: &Path, offset: u64, size: usize) -> RingResult<(File, MmapMut)> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|source| RingError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    validate_region_in_file(&file, path, offset, size)?;

    let mmap = unsafe { MmapOptions::new().offset(offset).len(size).map_mut(&file) }.map_err(
        |source| RingError::Map {
            path: path.to_path_buf(),
            offset,
            size,
            source,
        },
    )?;

    Ok((file, mmap))
}

/// Require the backing file to cover the whole requested region
///
/// mmap would happily map past EOF and defer the failure to a SIGBUS on
/// first access; checking the file length up front turns that into an
/// ordinary map error instead.
fn validate_region_in_file(file: &File, path: &Path, offset: u64, size: usize) -> RingResult<()> {
    let file_len = file.metadata().map_err(|source| RingError::Open {
        path: path.to_path_buf(),
        source,
    })?.len();

    if offset + size as u64 > file_len {
        return Err(RingError::Map {
            path: path.to_path_buf(),
            offset,
            size,
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "region extends past end of file ({} bytes)",
                    file_len
                ),
            ),
        });
    }
    Ok(())
}
