//! # Mapring — Memory-Mapped Shared Ring Buffer
//!
//! A circular buffer over a memory-mapped region of a regular file, used as
//! a zero-copy transport between two cooperating processes (for example the
//! reader and writer endpoints of a tunnel). The same `(path, offset, size)`
//! region is mapped read-write by one process and read-only by the other;
//! because the mapping is shared and file-backed, the writer's stores are
//! visible through the reader's view.
//!
//! ## Features
//!
//! - **Zero-copy transport**: endpoints operate directly on the mapped
//!   region; only the caller-facing copy in/out touches user buffers
//! - **Mode asymmetry**: [`RingWriter`] opens read-write, [`RingReader`]
//!   opens read-only, and a read-only descriptor cannot write through its
//!   mapping
//! - **Wraparound cursors**: each endpoint advances an independent logical
//!   cursor; operations crossing the end of the region split into a
//!   tail-of-region and a head-of-region copy
//! - **All-or-nothing lifecycle**: a failed mapping never leaks the file
//!   handle, and close releases mapping then handle exactly once
//!
//! ## Usage
//!
//! The driving application creates and sizes the backing file, picks a
//! consistent `(path, offset, size)` triple for both endpoints, and closes
//! each descriptor exactly once:
//!
//! ```rust
//! use mapring::{RingReader, RingWriter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let path = std::env::temp_dir().join("mapring-doc-basic.ring");
//! let file = std::fs::File::create(&path)?;
//! file.set_len(4096)?;
//!
//! let mut writer = RingWriter::open(&path, 0, 4096)?;
//! writer.write(b"hello through the map")?;
//!
//! let mut reader = RingReader::open(&path, 0, 4096)?;
//! assert_eq!(reader.read(21)?, b"hello through the map");
//!
//! writer.close()?;
//! reader.close()?;
//! # std::fs::remove_file(&path)?;
//! # Ok(())
//! # }
//! ```
//!
//! Writes that cross the end of the region wrap to its start:
//!
//! ```rust
//! use mapring::{BufferMode, RingBuffer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let path = std::env::temp_dir().join("mapring-doc-wrap.ring");
//! let file = std::fs::File::create(&path)?;
//! file.set_len(1024)?;
//!
//! let mut buf = RingBuffer::open(&path, 0, 1024, BufferMode::ReadWrite)?;
//! buf.set_position(1000);
//! buf.write(&[0xBB; 50])?; // 24 bytes at the tail, 26 at the head
//!
//! buf.set_position(1000);
//! assert_eq!(buf.read(50)?, &[0xBB; 50]);
//! # buf.close()?;
//! # std::fs::remove_file(&path)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## What this crate does not do
//!
//! - **No flow control.** Writing more than the capacity of unread data
//!   overwrites it; blocking, backpressure, or dropping is the caller's
//!   policy.
//! - **No cross-process synchronization.** Nothing orders a reader's
//!   cursor against a writer's. Callers that run the endpoints
//!   concurrently must supply their own handshake (a semaphore, futex, or
//!   sequence numbers exchanged in a separate header region) to keep a
//!   reader from observing a half-written wrap segment. A shared
//!   atomic-cursor header inside the region is a deliberate extension
//!   point, not something this crate guesses at.
//! - **No file management.** The backing file must exist with length at
//!   least `offset + size` before [`RingBuffer::open`] is called.
//!
//! ## Error handling
//!
//! All operations return [`RingResult<T>`] with a typed [`RingError`].
//! Construction errors release any partially acquired resource before
//! returning; operation errors leave the descriptor valid and its cursor
//! unchanged; teardown errors are reported but never leave a resource
//! held.
//!
//! ## Thread safety
//!
//! - [`RingWriter`]: NOT thread-safe — single writer per region
//! - [`RingReader`]: owns a cursor and a scratch buffer, so one per thread
//! - Both are `Send`; neither hands out aliasing views of the mapping

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod error;
pub mod platform;
pub mod reader;
pub mod writer;

pub use buffer::{BufferMode, RingBuffer};
pub use error::{RingError, RingResult};
pub use reader::RingReader;
pub use writer::RingWriter;

/// Initialize tracing for diagnostics
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
