//! Crate-level error type.

use thiserror::Error;

use crate::binary::BinaryError;
use crate::text::TextError;

/// Errors from the reader/writer entry points, which can fail on I/O as well
/// as on malformed input.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Text(#[from] TextError),
    #[error(transparent)]
    Binary(#[from] BinaryError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
