//! Binary VDF encoder.

use std::io::Write;

use tracing::debug;
use vdf_buffers::Writer;

use super::constants::BinaryTag;
use super::BinaryError;
use crate::mapping::Mapping;
use crate::value::Value;

const UTF16_LE_BOM: [u8; 2] = [0xff, 0xfe];

/// Binary VDF encoder.
///
/// Every level, root included, is closed with an `END` byte. A string is
/// written as `STRING` when it is pure ASCII and as `WIDESTRING` otherwise:
/// a little-endian byte-order mark, then UTF-16LE. The output buffer is
/// reused across calls.
#[derive(Debug, Default)]
pub struct BinaryVdfEncoder {
    pub writer: Writer,
}

impl BinaryVdfEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encodes `map` and returns the bytes. An empty mapping encodes to an
    /// empty buffer.
    pub fn encode<M: Mapping>(&mut self, map: &M) -> Result<Vec<u8>, BinaryError> {
        self.writer.reset();
        if !map.is_empty() {
            self.write_map(map)?;
        }
        debug!(bytes = self.writer.len(), "encoded binary vdf");
        Ok(self.writer.flush())
    }

    /// Encodes `map` into `writer`. Nothing is written if encoding fails.
    pub fn encode_to<M: Mapping, W: Write>(
        &mut self,
        map: &M,
        mut writer: W,
    ) -> Result<(), crate::Error> {
        let bytes = self.encode(map)?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    fn write_map<M: Mapping>(&mut self, map: &M) -> Result<(), BinaryError> {
        for (key, value) in map.iter() {
            self.write_entry(key, value)?;
        }
        self.writer.u8(BinaryTag::End as u8);
        Ok(())
    }

    fn write_entry<M: Mapping>(
        &mut self,
        key: &str,
        value: &Value<M>,
    ) -> Result<(), BinaryError> {
        let tag = match value {
            Value::Map(_) => BinaryTag::Nested,
            Value::Str(s) if s.is_ascii() => BinaryTag::String,
            Value::Str(_) => BinaryTag::WideString,
            Value::Int32(_) => BinaryTag::Int32,
            Value::Float32(_) => BinaryTag::Float32,
            Value::Pointer(_) => BinaryTag::Pointer,
            Value::Color(_) => BinaryTag::Color,
            Value::UInt64(_) => BinaryTag::UInt64,
        };
        let nul = || BinaryError::InteriorNul {
            key: key.to_owned(),
        };
        if key.contains('\0') {
            return Err(nul());
        }

        self.writer.u8(tag as u8);
        self.writer.cstr(key.as_bytes());
        match value {
            Value::Map(nested) => return self.write_map(nested),
            Value::Str(s) if s.contains('\0') => return Err(nul()),
            Value::Str(s) if tag == BinaryTag::String => self.writer.cstr(s.as_bytes()),
            Value::Str(s) => {
                self.writer.buf(&UTF16_LE_BOM);
                self.writer.wide_cstr(s);
            }
            Value::Int32(n) => self.writer.i32_le(*n),
            Value::Float32(n) => self.writer.f32_le(*n),
            Value::Pointer(p) => self.writer.i32_le(p.0),
            Value::Color(c) => self.writer.i32_le(c.0),
            Value::UInt64(n) => self.writer.u64_le(n.0),
        }
        Ok(())
    }
}
