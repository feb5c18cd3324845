//! The byte sink used by every `WireEncode` implementation.

use crate::CodecError;

/// A growable byte sink that appends canonical wire encodings.
///
/// All multi-byte integers are written little-endian, matching the
/// chain's wire format. Structures are written as the plain
/// concatenation of their fields — no padding, no alignment, no
/// structure-level length prefix.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    /// Creates an empty encoder.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates an encoder with a pre-allocated buffer.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
        }
    }

    /// Appends a single byte.
    pub fn push_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    /// Appends a `u16` as 2 little-endian bytes.
    pub fn push_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Appends a `u32` as 4 little-endian bytes.
    pub fn push_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Appends a `u64` as 8 little-endian bytes.
    pub fn push_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Appends an `i64` as 8 little-endian bytes.
    pub fn push_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Appends a `u32` as a LEB128-style varint.
    ///
    /// 7 value bits per byte, continuation bit (0x80) set on every byte
    /// except the last. Zero encodes as a single `0x00` byte.
    pub fn push_varuint32(&mut self, mut v: u32) {
        loop {
            let mut byte = (v & 0x7f) as u8;
            v >>= 7;
            if v != 0 {
                byte |= 0x80;
            }
            self.buf.push(byte);
            if v == 0 {
                break;
            }
        }
    }

    /// Appends a length-prefixed blob: varint byte count, then the raw
    /// bytes. An empty blob is exactly one `0x00` byte.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        let len = u32::try_from(bytes.len())
            .map_err(|_| CodecError::Oversize(bytes.len()))?;
        self.push_varuint32(len);
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Appends raw bytes with no prefix. Used by fixed-width kinds
    /// whose size is implied by their type.
    pub fn push_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the encoder and returns the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_are_little_endian() {
        let mut enc = Encoder::new();
        enc.push_u32(0x0102_0304);
        assert_eq!(enc.into_bytes(), vec![0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_varint_zero_is_single_zero_byte() {
        let mut enc = Encoder::new();
        enc.push_varuint32(0);
        assert_eq!(enc.into_bytes(), vec![0x00]);
    }

    #[test]
    fn test_varint_boundary_widths() {
        // 127 fits in one byte; 128 needs the continuation bit.
        let mut enc = Encoder::new();
        enc.push_varuint32(127);
        assert_eq!(enc.len(), 1);

        let mut enc = Encoder::new();
        enc.push_varuint32(128);
        assert_eq!(enc.into_bytes(), vec![0x80, 0x01]);
    }

    #[test]
    fn test_empty_blob_is_one_byte() {
        let mut enc = Encoder::new();
        enc.push_bytes(&[]).unwrap();
        assert_eq!(enc.into_bytes(), vec![0x00]);
    }

    #[test]
    fn test_blob_is_length_then_raw() {
        let mut enc = Encoder::new();
        enc.push_bytes(&[0xaa, 0xbb]).unwrap();
        assert_eq!(enc.into_bytes(), vec![0x02, 0xaa, 0xbb]);
    }
}
