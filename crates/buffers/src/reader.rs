//! Little-endian byte reader with cursor tracking.

use crate::BufferError;

/// A binary buffer reader over a borrowed byte slice.
///
/// Every read checks the remaining length first and fails with
/// [`BufferError::EndOfBuffer`] instead of panicking, so a decoder can turn a
/// short input into a positioned error of its own.
///
/// # Example
///
/// ```
/// use vdf_buffers::Reader;
///
/// let data = [0x2a, 0x00, 0x00, 0x00, b'k', 0x00];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.i32_le().unwrap(), 42);
/// assert_eq!(reader.cstr().unwrap(), b"k");
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    /// Returns `true` once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.x >= self.end
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn peek(&self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some(self.uint8[self.x])
        }
    }

    fn ensure(&self, n: usize) -> Result<(), BufferError> {
        if self.size() < n {
            return Err(BufferError::EndOfBuffer);
        }
        Ok(())
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.uint8[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        Ok(self.array::<1>()?[0])
    }

    /// Reads a signed 32-bit integer (little-endian).
    #[inline]
    pub fn i32_le(&mut self) -> Result<i32, BufferError> {
        self.array().map(i32::from_le_bytes)
    }

    /// Reads an unsigned 64-bit integer (little-endian).
    #[inline]
    pub fn u64_le(&mut self) -> Result<u64, BufferError> {
        self.array().map(u64::from_le_bytes)
    }

    /// Reads a 32-bit floating point number (little-endian).
    #[inline]
    pub fn f32_le(&mut self) -> Result<f32, BufferError> {
        self.array().map(f32::from_le_bytes)
    }

    /// Reads a NUL-terminated byte string.
    ///
    /// Returns the bytes before the terminator and leaves the cursor after
    /// it. On failure the cursor does not move.
    pub fn cstr(&mut self) -> Result<&'a [u8], BufferError> {
        let rest = &self.uint8[self.x..self.end];
        let len = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(BufferError::Unterminated)?;
        self.x += len + 1;
        Ok(&rest[..len])
    }

    /// Reads a UTF-16 string terminated by a two-byte NUL unit.
    ///
    /// The terminator is searched on 2-byte boundaries relative to the
    /// current position. Returns the raw code unit bytes without the
    /// terminator.
    pub fn wide_cstr(&mut self) -> Result<&'a [u8], BufferError> {
        let rest = &self.uint8[self.x..self.end];
        let len = rest
            .chunks_exact(2)
            .position(|unit| unit == [0, 0])
            .map(|units| units * 2)
            .ok_or(BufferError::Unterminated)?;
        self.x += len + 2;
        Ok(&rest[..len])
    }
}
