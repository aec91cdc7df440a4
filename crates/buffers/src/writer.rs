//! Auto-growing little-endian byte writer.

/// A binary buffer writer backed by a growable vector.
///
/// The writer is reusable: [`Writer::flush`] hands out the written bytes and
/// leaves an empty buffer behind.
#[derive(Debug, Default, Clone)]
pub struct Writer {
    uint8: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards everything written so far.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Takes the written bytes, leaving the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    #[inline]
    pub fn i32_le(&mut self, val: i32) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    #[inline]
    pub fn u64_le(&mut self, val: u64) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    #[inline]
    pub fn f32_le(&mut self, val: f32) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes raw bytes.
    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    /// Writes `data` followed by a single NUL byte.
    pub fn cstr(&mut self, data: &[u8]) {
        self.buf(data);
        self.u8(0);
    }

    /// Writes `s` as UTF-16LE code units followed by a two-byte NUL unit.
    pub fn wide_cstr(&mut self, s: &str) {
        for unit in s.encode_utf16() {
            self.uint8.extend_from_slice(&unit.to_le_bytes());
        }
        self.buf(&[0, 0]);
    }
}
