//! Valve's binary VDF format.
//!
//! The flat record stream Steam uses for `appinfo.vdf`, `shortcuts.vdf` and
//! similar files. Integers and floats are little-endian.

mod constants;
mod decoder;
mod encoder;
mod error;
mod types;

pub use constants::BinaryTag;
pub use decoder::BinaryVdfDecoder;
pub use encoder::BinaryVdfEncoder;
pub use error::BinaryError;
pub use types::{Color, Pointer, UInt64};
