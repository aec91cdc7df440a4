//! Binary VDF encoder/decoder error type.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BinaryError {
    #[error("unknown data type 0x{tag:02x} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },
    #[error("unterminated string at offset {offset}")]
    UnterminatedString { offset: usize },
    #[error("truncated value at offset {offset}")]
    Truncated { offset: usize },
    #[error("input ended inside the mapping opened at offset {offset}")]
    UnbalancedNesting { offset: usize },
    #[error("trailing data at offset {offset}")]
    TrailingData { offset: usize },
    #[error("key or string value under {key:?} contains a NUL character")]
    InteriorNul { key: String },
}
