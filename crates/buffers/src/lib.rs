//! Binary buffer utilities for the VDF codec.
//!
//! # Overview
//!
//! - [`Reader`] - Reads little-endian data from a byte slice with cursor tracking
//! - [`Writer`] - Writes little-endian data to an auto-growing buffer
//!
//! # Example
//!
//! ```
//! use vdf_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x02);
//! writer.cstr(b"key");
//! writer.i32_le(-500);
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8().unwrap(), 0x02);
//! assert_eq!(reader.cstr().unwrap(), b"key");
//! assert_eq!(reader.i32_le().unwrap(), -500);
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Error type for buffer operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    #[error("end of buffer")]
    EndOfBuffer,
    /// A terminated string ran to the end of the buffer.
    #[error("unterminated string")]
    Unterminated,
}
