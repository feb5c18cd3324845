//! Byte-blob types: variable-length payloads, digests, and keys.

use std::fmt;
use std::str::FromStr;

use chainwire_codec::{CodecError, Decoder, Encoder, WireDecode, WireEncode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn decode_hex_field(s: &str) -> Result<Vec<u8>, CodecError> {
    hex::decode(s).map_err(|e| {
        CodecError::InvalidFormat(format!("invalid hex string: {e}"))
    })
}

// ---------------------------------------------------------------------------
// HexBytes — length-prefixed blob, hex in JSON
// ---------------------------------------------------------------------------

/// An opaque byte blob.
///
/// On the wire: varint length then the raw bytes. In JSON: a lowercase
/// hex string. The bytes themselves mean nothing to this layer — they
/// are contract payloads, packed ABIs, serialized sub-structures.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct HexBytes(pub Vec<u8>);

impl HexBytes {
    /// The raw bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Number of raw bytes (not the encoded length).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the blob is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for HexBytes {
    fn from(v: Vec<u8>) -> Self {
        HexBytes(v)
    }
}

impl From<&[u8]> for HexBytes {
    fn from(v: &[u8]) -> Self {
        HexBytes(v.to_vec())
    }
}

impl fmt::Display for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl FromStr for HexBytes {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex_field(s).map(HexBytes)
    }
}

impl WireEncode for HexBytes {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.push_bytes(&self.0)
    }
}

impl WireDecode for HexBytes {
    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(HexBytes(dec.read_bytes()?.to_vec()))
    }
}

impl Serialize for HexBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Checksum256 — fixed 32-byte digest
// ---------------------------------------------------------------------------

/// A 32-byte digest (block ids, transaction ids, node ids).
///
/// Fixed width on the wire — raw 32 bytes, no prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Checksum256(pub [u8; 32]);

impl fmt::Display for Checksum256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Checksum256 {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex_field(s)?;
        let arr: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            CodecError::InvalidFormat(format!(
                "checksum must be 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Checksum256(arr))
    }
}

impl WireEncode for Checksum256 {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.push_raw(&self.0);
        Ok(())
    }
}

impl WireDecode for Checksum256 {
    const FIXED_SIZE: Option<usize> = Some(32);

    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Checksum256(dec.read_array()?))
    }
}

impl Serialize for Checksum256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Checksum256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// PublicKey — opaque key material
// ---------------------------------------------------------------------------

/// Width of a key on the wire: 1 curve-type byte + 33 compressed-point
/// bytes.
pub const PUBLIC_KEY_LEN: usize = 34;

/// An opaque public key.
///
/// The cryptographic meaning of the bytes belongs to the key layer,
/// which is an external collaborator — this crate only guarantees that
/// the 34 wire bytes round-trip. The JSON form is hex for the same
/// reason; the key layer owns the friendlier base-58 display.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Wraps raw key material.
    pub fn new(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        PublicKey(bytes)
    }

    /// The raw key material.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl Default for PublicKey {
    fn default() -> Self {
        PublicKey([0; PUBLIC_KEY_LEN])
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.0))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for PublicKey {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex_field(s)?;
        let arr: [u8; PUBLIC_KEY_LEN] =
            bytes.as_slice().try_into().map_err(|_| {
                CodecError::InvalidFormat(format!(
                    "public key must be {PUBLIC_KEY_LEN} bytes, got {}",
                    bytes.len()
                ))
            })?;
        Ok(PublicKey(arr))
    }
}

impl WireEncode for PublicKey {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.push_raw(&self.0);
        Ok(())
    }
}

impl WireDecode for PublicKey {
    const FIXED_SIZE: Option<usize> = Some(PUBLIC_KEY_LEN);

    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(PublicKey(dec.read_array()?))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
