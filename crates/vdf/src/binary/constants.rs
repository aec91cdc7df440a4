//! Binary VDF record tags.

/// Tag byte that starts every binary record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BinaryTag {
    Nested = 0x00,
    String = 0x01,
    Int32 = 0x02,
    Float32 = 0x03,
    Pointer = 0x04,
    WideString = 0x05,
    Color = 0x06,
    UInt64 = 0x07,
    End = 0x08,
}

impl TryFrom<u8> for BinaryTag {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Ok(match byte {
            0x00 => BinaryTag::Nested,
            0x01 => BinaryTag::String,
            0x02 => BinaryTag::Int32,
            0x03 => BinaryTag::Float32,
            0x04 => BinaryTag::Pointer,
            0x05 => BinaryTag::WideString,
            0x06 => BinaryTag::Color,
            0x07 => BinaryTag::UInt64,
            0x08 => BinaryTag::End,
            other => return Err(other),
        })
    }
}
