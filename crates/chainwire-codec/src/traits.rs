//! The codec's capability traits and the primitive codec rules.
//!
//! The engine never probes a value for encode/decode methods at
//! runtime. A type participates in the wire format by declaring trait
//! conformance: implement [`WireEncode`]/[`WireDecode`] and the generic
//! machinery (collections, `wire_struct!`, the envelope, the framer)
//! composes it. Irregular formats — name packing, padded symbols,
//! varints — live entirely inside the owning type's impl; the engine
//! uses the result verbatim.

use crate::{CodecError, Decoder, Encoder};

/// A type that can write itself in the canonical binary format.
pub trait WireEncode {
    /// Appends this value's canonical encoding to `enc`.
    ///
    /// # Errors
    /// Returns a [`CodecError`] when the value cannot be represented —
    /// e.g. an identifier with characters outside the name alphabet,
    /// or a blob too large for its length prefix.
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError>;
}

/// A type that can read itself back from the canonical binary format.
pub trait WireDecode: Sized {
    /// The fixed encoded width of this type, if it has one.
    ///
    /// `Some(n)` lets a container verify availability up front and
    /// slice exactly `n` bytes per element instead of probing field by
    /// field. Self-describing kinds (varints, blobs, structures with
    /// variable fields) leave this `None`.
    const FIXED_SIZE: Option<usize> = None;

    /// Decodes one value from the cursor, consuming exactly the bytes
    /// that belong to it.
    ///
    /// # Errors
    /// Returns a [`CodecError`] when the input is truncated or
    /// malformed. Decoding never consumes a partial value silently.
    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError>;
}

// ---------------------------------------------------------------------------
// Fixed-width integers
// ---------------------------------------------------------------------------

macro_rules! wire_int {
    ($($ty:ty),* $(,)?) => {$(
        impl WireEncode for $ty {
            fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
                enc.push_raw(&self.to_le_bytes());
                Ok(())
            }
        }

        impl WireDecode for $ty {
            const FIXED_SIZE: Option<usize> = Some(size_of::<$ty>());

            fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
                Ok(<$ty>::from_le_bytes(dec.read_array()?))
            }
        }
    )*};
}

wire_int!(u8, u16, u32, u64, i8, i16, i32, i64);

// ---------------------------------------------------------------------------
// bool
// ---------------------------------------------------------------------------

impl WireEncode for bool {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.push_u8(u8::from(*self));
        Ok(())
    }
}

impl WireDecode for bool {
    const FIXED_SIZE: Option<usize> = Some(1);

    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        match dec.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidFormat(format!(
                "invalid bool byte 0x{other:02x}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Varuint32 — explicit variable-length integer
// ---------------------------------------------------------------------------

/// A `u32` that travels as a LEB128-style varint instead of 4 fixed
/// bytes. Used wherever the chain counts things: collection lengths,
/// blob sizes, and a handful of protocol fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Varuint32(pub u32);

impl WireEncode for Varuint32 {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.push_varuint32(self.0);
        Ok(())
    }
}

impl WireDecode for Varuint32 {
    // No FIXED_SIZE: the encoding is self-describing and must be read
    // byte-by-byte off the cursor.
    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Varuint32(dec.read_varuint32()?))
    }
}

impl From<u32> for Varuint32 {
    fn from(v: u32) -> Self {
        Varuint32(v)
    }
}

impl From<Varuint32> for u32 {
    fn from(v: Varuint32) -> Self {
        v.0
    }
}

// ---------------------------------------------------------------------------
// String — length-prefixed UTF-8
// ---------------------------------------------------------------------------

impl WireEncode for String {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.push_bytes(self.as_bytes())
    }
}

impl WireDecode for String {
    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let bytes = dec.read_bytes()?.to_vec();
        String::from_utf8(bytes).map_err(CodecError::InvalidUtf8)
    }
}

impl WireEncode for str {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.push_bytes(self.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Vec<T> — varint count, then each element in order
// ---------------------------------------------------------------------------

impl<T: WireEncode> WireEncode for Vec<T> {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        let len = u32::try_from(self.len())
            .map_err(|_| CodecError::Oversize(self.len()))?;
        enc.push_varuint32(len);
        for item in self {
            item.wire_encode(enc)?;
        }
        Ok(())
    }
}

impl<T: WireDecode> WireDecode for Vec<T> {
    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let count = dec.read_varuint32()? as usize;

        // When the element width is known, reject impossible counts
        // before allocating or decoding anything.
        if let Some(elem) = T::FIXED_SIZE {
            let needed = count.saturating_mul(elem);
            if dec.remaining() < needed {
                return Err(CodecError::Truncated {
                    needed,
                    available: dec.remaining(),
                });
            }
        }

        let mut out = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            out.push(T::wire_decode(dec)?);
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Option<T> — one presence byte, then the value if present
// ---------------------------------------------------------------------------

impl<T: WireEncode> WireEncode for Option<T> {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        match self {
            Some(v) => {
                enc.push_u8(1);
                v.wire_encode(enc)
            }
            None => {
                enc.push_u8(0);
                Ok(())
            }
        }
    }
}

impl<T: WireDecode> WireDecode for Option<T> {
    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        match dec.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(T::wire_decode(dec)?)),
            other => Err(CodecError::InvalidFormat(format!(
                "invalid option flag 0x{other:02x}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// [u8; N] — raw fixed-width bytes, no prefix
// ---------------------------------------------------------------------------

impl<const N: usize> WireEncode for [u8; N] {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.push_raw(self);
        Ok(())
    }
}

impl<const N: usize> WireDecode for [u8; N] {
    const FIXED_SIZE: Option<usize> = Some(N);

    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        dec.read_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode_exact, decode_from_slice, encode_to_vec};

    #[test]
    fn test_integer_round_trip() {
        let bytes = encode_to_vec(&0xdead_beef_u32).unwrap();
        assert_eq!(bytes, vec![0xef, 0xbe, 0xad, 0xde]);
        let (back, used) = decode_from_slice::<u32>(&bytes).unwrap();
        assert_eq!(back, 0xdead_beef);
        assert_eq!(used, 4);
    }

    #[test]
    fn test_varuint32_round_trip_boundaries() {
        for v in [0u32, 1, 127, 128, 16383, 16384, u32::MAX] {
            let bytes = encode_to_vec(&Varuint32(v)).unwrap();
            let back: Varuint32 = decode_exact(&bytes).unwrap();
            assert_eq!(back.0, v, "value {v}");
        }
    }

    #[test]
    fn test_string_round_trip() {
        let s = "eosio".to_string();
        let bytes = encode_to_vec(&s).unwrap();
        // varint length 5, then the UTF-8 bytes.
        assert_eq!(bytes[0], 5);
        let back: String = decode_exact(&bytes).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_string_rejects_invalid_utf8() {
        let bytes = vec![0x02, 0xff, 0xfe];
        assert!(matches!(
            decode_exact::<String>(&bytes),
            Err(CodecError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_vec_round_trip() {
        let v = vec![1u16, 2, 3];
        let bytes = encode_to_vec(&v).unwrap();
        assert_eq!(bytes, vec![0x03, 1, 0, 2, 0, 3, 0]);
        let back: Vec<u16> = decode_exact(&bytes).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_vec_rejects_impossible_count_up_front() {
        // Count claims 200 u64s but only 2 bytes follow. The fixed
        // element size lets the decoder fail before touching them.
        let bytes = vec![0xc8, 0x01, 0xaa, 0xbb];
        assert!(matches!(
            decode_exact::<Vec<u64>>(&bytes),
            Err(CodecError::Truncated { .. })
        ));
    }

    #[test]
    fn test_option_round_trip() {
        let some = Some(42u32);
        let bytes = encode_to_vec(&some).unwrap();
        assert_eq!(bytes, vec![0x01, 42, 0, 0, 0]);
        assert_eq!(decode_exact::<Option<u32>>(&bytes).unwrap(), some);

        let none: Option<u32> = None;
        let bytes = encode_to_vec(&none).unwrap();
        assert_eq!(bytes, vec![0x00]);
        assert_eq!(decode_exact::<Option<u32>>(&bytes).unwrap(), none);
    }

    #[test]
    fn test_fixed_array_round_trip() {
        let arr = [1u8, 2, 3, 4];
        let bytes = encode_to_vec(&arr).unwrap();
        assert_eq!(bytes, vec![1, 2, 3, 4]);
        let back: [u8; 4] = decode_exact(&bytes).unwrap();
        assert_eq!(back, arr);
    }

    #[test]
    fn test_bool_rejects_out_of_range_byte() {
        assert!(matches!(
            decode_exact::<bool>(&[0x02]),
            Err(CodecError::InvalidFormat(_))
        ));
    }
}
