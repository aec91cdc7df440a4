//! Valve's KeyValues text format.
//!
//! Documents are line oriented: a `"key" "value"` pair per line, or a key on
//! its own line followed by a `{ ... }` block. Quotes are optional for simple
//! tokens, `//` lines are comments, and a quoted value may span lines.

mod decoder;
mod encoder;
mod error;

pub use decoder::VdfDecoder;
pub use encoder::VdfEncoder;
pub use error::TextError;
