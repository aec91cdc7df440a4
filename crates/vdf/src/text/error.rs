//! Text VDF decoder error type.

use thiserror::Error;

/// Errors raised while decoding VDF text. Line numbers are 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("invalid syntax (line {line})")]
    InvalidSyntax { line: usize },
    #[error("expected opening bracket (line {line})")]
    UnexpectedToken { line: usize },
    /// A `}` with no open level, or input ending while the level opened at
    /// `line` is still open.
    #[error("unbalanced nesting (line {line})")]
    UnbalancedNesting { line: usize },
    #[error("unterminated quoted value starting at line {line}")]
    UnterminatedQuote { line: usize },
}
