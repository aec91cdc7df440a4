//! Binary VDF decoder.

use std::io::Read;

use tracing::debug;
use vdf_buffers::{BufferError, Reader};

use super::constants::BinaryTag;
use super::types::{Color, Pointer, UInt64};
use super::BinaryError;
use crate::mapping::Mapping;
use crate::nesting::Nesting;
use crate::value::Value;
use crate::Error;

/// Binary VDF decoder.
///
/// A stream is a sequence of `tag, NUL-terminated key, payload` records;
/// `NESTED` opens a level and `END` closes one. A missing `END` for the root
/// level is tolerated, anything after it is not.
#[derive(Debug, Clone)]
pub struct BinaryVdfDecoder {
    pub merge_duplicate_keys: bool,
}

impl Default for BinaryVdfDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryVdfDecoder {
    pub fn new() -> Self {
        Self {
            merge_duplicate_keys: true,
        }
    }

    pub fn decode<M: Mapping>(&self, data: &[u8]) -> Result<M, BinaryError> {
        debug!(
            bytes = data.len(),
            merge = self.merge_duplicate_keys,
            "decoding binary vdf"
        );
        let mut reader = Reader::new(data);
        let mut nesting = Nesting::<M>::new();

        while !reader.is_empty() {
            let offset = reader.x;
            let raw = reader.u8().map_err(|_| BinaryError::Truncated { offset })?;
            let tag = BinaryTag::try_from(raw)
                .map_err(|tag| BinaryError::UnknownTag { tag, offset })?;

            match tag {
                BinaryTag::End => {
                    if !nesting.close() {
                        break;
                    }
                }
                BinaryTag::Nested => {
                    let key = read_utf8(&mut reader)?;
                    nesting.open(key, self.merge_duplicate_keys, offset);
                }
                BinaryTag::String => {
                    read_entry(&mut reader, &mut nesting, |r| read_utf8(r).map(Value::Str))?
                }
                BinaryTag::WideString => {
                    read_entry(&mut reader, &mut nesting, |r| read_utf16(r).map(Value::Str))?
                }
                BinaryTag::Int32 => read_entry(&mut reader, &mut nesting, |r| {
                    fixed(r, Reader::i32_le).map(Value::Int32)
                })?,
                BinaryTag::Float32 => read_entry(&mut reader, &mut nesting, |r| {
                    fixed(r, Reader::f32_le).map(Value::Float32)
                })?,
                BinaryTag::Pointer => read_entry(&mut reader, &mut nesting, |r| {
                    fixed(r, Reader::i32_le).map(|n| Value::Pointer(Pointer(n)))
                })?,
                BinaryTag::Color => read_entry(&mut reader, &mut nesting, |r| {
                    fixed(r, Reader::i32_le).map(|n| Value::Color(Color(n)))
                })?,
                BinaryTag::UInt64 => read_entry(&mut reader, &mut nesting, |r| {
                    fixed(r, Reader::u64_le).map(|n| Value::UInt64(UInt64(n)))
                })?,
            }
        }

        if let Some(offset) = nesting.innermost() {
            return Err(BinaryError::UnbalancedNesting { offset });
        }
        if !reader.is_empty() {
            return Err(BinaryError::TrailingData { offset: reader.x });
        }
        let root = nesting
            .finish()
            .map_err(|offset| BinaryError::UnbalancedNesting { offset })?;
        debug!(entries = root.len(), "decoded binary vdf");
        Ok(root)
    }

    /// Reads `reader` to the end and decodes the bytes.
    pub fn decode_reader<M: Mapping, R: Read>(&self, mut reader: R) -> Result<M, Error> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(self.decode(&data)?)
    }
}

/// Reads a key and then its payload with `read`, and binds them at the
/// current level.
fn read_entry<'a, M: Mapping>(
    reader: &mut Reader<'a>,
    nesting: &mut Nesting<M>,
    read: impl FnOnce(&mut Reader<'a>) -> Result<Value<M>, BinaryError>,
) -> Result<(), BinaryError> {
    let key = read_utf8(reader)?;
    let value = read(reader)?;
    nesting.current().insert(key, value);
    Ok(())
}

/// Fixed-width payload; a short read is reported at the payload start.
fn fixed<'a, T>(
    reader: &mut Reader<'a>,
    read: impl FnOnce(&mut Reader<'a>) -> Result<T, BufferError>,
) -> Result<T, BinaryError> {
    let offset = reader.x;
    read(reader).map_err(|_| BinaryError::Truncated { offset })
}

/// NUL-terminated UTF-8; invalid sequences are replaced.
fn read_utf8(reader: &mut Reader<'_>) -> Result<String, BinaryError> {
    let offset = reader.x;
    let bytes = reader
        .cstr()
        .map_err(|_| BinaryError::UnterminatedString { offset })?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// UTF-16 terminated by an aligned double NUL. Little-endian unless a leading
/// byte-order mark says otherwise; exactly one mark is dropped.
fn read_utf16(reader: &mut Reader<'_>) -> Result<String, BinaryError> {
    let offset = reader.x;
    let bytes = reader
        .wide_cstr()
        .map_err(|_| BinaryError::UnterminatedString { offset })?;
    let (bytes, from_bytes): (_, fn([u8; 2]) -> u16) = match bytes {
        [0xfe, 0xff, rest @ ..] => (rest, u16::from_be_bytes),
        [0xff, 0xfe, rest @ ..] => (rest, u16::from_le_bytes),
        _ => (bytes, u16::from_le_bytes),
    };
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|unit| from_bytes([unit[0], unit[1]]))
        .collect();
    Ok(String::from_utf16_lossy(&units))
}
