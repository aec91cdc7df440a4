//! Multi-map error type.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DictError {
    #[error("key not found: {0:?}")]
    KeyNotFound(String),
    #[error("entry no longer exists")]
    StaleEntry,
}
