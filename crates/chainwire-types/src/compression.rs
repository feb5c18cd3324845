//! The packed-transaction compression flag.

use chainwire_codec::{CodecError, Decoder, Encoder, WireDecode, WireEncode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a packed transaction's payload is compressed.
///
/// One byte on the wire; a lowercase keyword in JSON. JSON input is
/// deliberately lenient — anything that is not `"zlib"` reads as
/// `None`, matching what nodes actually emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CompressionType {
    /// Payload bytes are used as-is.
    #[default]
    None,
    /// Payload bytes are zlib-deflated.
    Zlib,
}

impl CompressionType {
    /// The JSON keyword for this flag.
    pub fn as_str(self) -> &'static str {
        match self {
            CompressionType::None => "none",
            CompressionType::Zlib => "zlib",
        }
    }
}

impl WireEncode for CompressionType {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.push_u8(*self as u8);
        Ok(())
    }
}

impl WireDecode for CompressionType {
    const FIXED_SIZE: Option<usize> = Some(1);

    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        match dec.read_u8()? {
            0 => Ok(CompressionType::None),
            1 => Ok(CompressionType::Zlib),
            other => Err(CodecError::InvalidFormat(format!(
                "unknown compression flag 0x{other:02x}"
            ))),
        }
    }
}

impl Serialize for CompressionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CompressionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "zlib" => CompressionType::Zlib,
            _ => CompressionType::None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainwire_codec::{decode_exact, encode_to_vec};

    #[test]
    fn test_wire_round_trip() {
        for c in [CompressionType::None, CompressionType::Zlib] {
            let bytes = encode_to_vec(&c).unwrap();
            assert_eq!(bytes.len(), 1);
            assert_eq!(decode_exact::<CompressionType>(&bytes).unwrap(), c);
        }
    }

    #[test]
    fn test_unknown_wire_flag_rejected() {
        assert!(decode_exact::<CompressionType>(&[0x07]).is_err());
    }

    #[test]
    fn test_json_keywords() {
        assert_eq!(
            serde_json::to_string(&CompressionType::Zlib).unwrap(),
            "\"zlib\""
        );
        assert_eq!(
            serde_json::from_str::<CompressionType>("\"zlib\"").unwrap(),
            CompressionType::Zlib
        );
        // Lenient input: unknown keywords fall back to None.
        assert_eq!(
            serde_json::from_str::<CompressionType>("\"gzip\"").unwrap(),
            CompressionType::None
        );
    }
}
