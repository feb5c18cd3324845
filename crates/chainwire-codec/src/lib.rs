//! Canonical binary codec engine for chainwire.
//!
//! This crate is the bottom of the stack: it turns typed values into
//! the exact byte sequence the chain's network expects, and back.
//!
//! - **Traits** ([`WireEncode`], [`WireDecode`]) — the capability
//!   interface a type implements to participate in the wire format.
//! - **Cursors** ([`Encoder`], [`Decoder`]) — the byte sink and byte
//!   cursor every implementation writes to / reads from.
//! - **Primitive rules** — fixed-width little-endian integers,
//!   varints, length-prefixed strings/blobs, `Vec<T>`, `Option<T>`,
//!   fixed byte arrays.
//! - **[`wire_struct!`]** — generates field-order impls for plain
//!   structs, so hand-written codecs are only needed where the format
//!   is irregular.
//! - **Errors** ([`CodecError`]) — what can go wrong, all recoverable.
//!
//! # Architecture
//!
//! The codec layer knows nothing about actions, registries, or peer
//! messages. The higher layers hand it a value (or bytes plus a target
//! type) and use the result:
//!
//! ```text
//! Framer (bytes) ─┐
//!                 ├→ codec engine → typed value
//! Envelope (bytes)┘
//! ```

mod decoder;
mod encoder;
mod error;
mod macros;
mod traits;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::CodecError;
pub use traits::{Varuint32, WireDecode, WireEncode};

/// Encodes a value into a fresh byte vector.
///
/// # Errors
/// Propagates any [`CodecError`] from the value's encoder — e.g. an
/// identifier outside the name alphabet.
pub fn encode_to_vec<T: WireEncode + ?Sized>(
    value: &T,
) -> Result<Vec<u8>, CodecError> {
    let mut enc = Encoder::new();
    value.wire_encode(&mut enc)?;
    Ok(enc.into_bytes())
}

/// Decodes one value from the front of `data`, returning it together
/// with the number of bytes consumed.
///
/// Trailing bytes are left for the caller — the wire format routinely
/// concatenates values, so "one value plus how much it used" is the
/// primitive operation.
///
/// # Errors
/// Fails with a [`CodecError`] if the bytes are insufficient or
/// malformed for `T`.
pub fn decode_from_slice<T: WireDecode>(
    data: &[u8],
) -> Result<(T, usize), CodecError> {
    let mut dec = Decoder::new(data);
    let value = T::wire_decode(&mut dec)?;
    Ok((value, dec.position()))
}

/// Decodes one value that must consume the entire input.
///
/// # Errors
/// Like [`decode_from_slice`], plus [`CodecError::TrailingBytes`] when
/// the input is longer than the value's encoding.
pub fn decode_exact<T: WireDecode>(data: &[u8]) -> Result<T, CodecError> {
    let (value, consumed) = decode_from_slice(data)?;
    if consumed != data.len() {
        return Err(CodecError::TrailingBytes {
            consumed,
            total: data.len(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_from_slice_reports_consumed_bytes() {
        let data = [0x2a, 0x00, 0xff, 0xff];
        let (v, used) = decode_from_slice::<u16>(&data).unwrap();
        assert_eq!(v, 42);
        assert_eq!(used, 2);
    }

    #[test]
    fn test_decode_exact_rejects_trailing_bytes() {
        let data = [0x2a, 0x00, 0xff];
        assert!(matches!(
            decode_exact::<u16>(&data),
            Err(CodecError::TrailingBytes { consumed: 2, total: 3 })
        ));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let err = CodecError::UnknownType("transfer".into());
        assert!(err.to_string().contains("transfer"));

        let err = CodecError::Truncated { needed: 8, available: 3 };
        assert!(err.to_string().contains('8'));
        assert!(err.to_string().contains('3'));
    }
}
