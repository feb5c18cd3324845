//! The byte cursor used by every `WireDecode` implementation.

use crate::CodecError;

/// Maximum encoded width of a 32-bit varint (5 × 7 bits ≥ 32 bits).
const MAX_VARUINT32_BYTES: usize = 5;

/// A cursor over a byte slice that consumes canonical wire encodings.
///
/// The wire format mixes two decode strategies and the cursor supports
/// both: fixed-width kinds slice exactly their known size out of the
/// input, while self-describing kinds (varints, length-prefixed blobs)
/// read byte-by-byte because only the bytes themselves reveal how long
/// the value is.
#[derive(Debug)]
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left in the input.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Slices exactly `n` bytes out of the input and advances.
    ///
    /// Fails with [`CodecError::Truncated`] instead of handing back a
    /// short slice — a positional format must never truncate silently.
    pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::Truncated {
                needed: n,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads a fixed-width byte array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_exact(N)?);
        Ok(out)
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_exact(1)?[0])
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian `u64`.
    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian `i64`.
    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    /// Reads a LEB128-style varint into a `u32`.
    ///
    /// Stops at the first byte without the continuation bit, even if
    /// more input follows — the value is self-describing. Rejects
    /// sequences that never terminate within 5 bytes and values that
    /// overflow 32 bits.
    pub fn read_varuint32(&mut self) -> Result<u32, CodecError> {
        let mut value: u64 = 0;
        for i in 0..MAX_VARUINT32_BYTES {
            let byte = self.read_u8()?;
            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return u32::try_from(value).map_err(|_| {
                    CodecError::InvalidVarint("value overflows u32")
                });
            }
        }
        Err(CodecError::InvalidVarint(
            "continuation bit still set after 5 bytes",
        ))
    }

    /// Reads a length-prefixed blob: varint byte count, then that many
    /// raw bytes.
    pub fn read_bytes(&mut self) -> Result<&'a [u8], CodecError> {
        let len = self.read_varuint32()? as usize;
        self.read_exact(len)
    }
}
