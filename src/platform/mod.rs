//! Platform-specific mapping support

#[cfg(unix)]
pub mod unix;

#[cfg(unix)]
pub use unix::{map_readonly, map_readwrite, page_size, validate_offset_alignment};
