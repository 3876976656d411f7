//! Error types for mapped ring buffer operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while opening or operating on a mapped ring buffer
#[derive(Error, Debug)]
pub enum RingError {
    /// Backing file could not be opened with the requested access
    #[error("failed to open backing file {}: {source}", path.display())]
    Open {
        /// Backing file path
        path: PathBuf,
        /// Source IO error
        source: std::io::Error,
    },

    /// Mapping could not be established over the backing file
    #[error("failed to map {size} bytes of {} at offset {offset}: {source}", path.display())]
    Map {
        /// Backing file path
        path: PathBuf,
        /// Requested mapping offset into the file
        offset: u64,
        /// Requested mapping length in bytes
        size: usize,
        /// Source IO error
        source: std::io::Error,
    },

    /// Invalid buffer capacity
    #[error("invalid buffer size: {size} bytes (must be > 0)")]
    InvalidSize {
        /// Attempted capacity in bytes
        size: usize,
    },

    /// Mapping offset not aligned to the platform's mapping granularity
    #[error("offset {offset} is not a multiple of the page size {alignment}")]
    Misaligned {
        /// Attempted mapping offset
        offset: u64,
        /// Required alignment in bytes
        alignment: u64,
    },

    /// Operation not permitted for the descriptor's access mode
    #[error("operation '{op}' is not permitted on a read-only buffer")]
    Mode {
        /// Name of the rejected operation
        op: &'static str,
    },

    /// A single read or write larger than the whole buffer
    #[error("operation of {requested} bytes exceeds buffer capacity of {capacity} bytes")]
    SizeExceeded {
        /// Requested transfer length in bytes
        requested: usize,
        /// Buffer capacity in bytes
        capacity: usize,
    },

    /// Writing dirty pages back to the backing file failed
    #[error("failed to flush mapping: {source}")]
    Flush {
        /// Source IO error
        source: std::io::Error,
    },

    /// Best-effort teardown reported a failure
    #[error("failed to close buffer cleanly: {source}")]
    Close {
        /// Source IO error
        source: std::io::Error,
    },
}

/// Result type for ring buffer operations
pub type RingResult<T> = Result<T, RingError>;
