//! The `wire_struct!` impl generator.

/// Implements [`WireEncode`](crate::WireEncode) and
/// [`WireDecode`](crate::WireDecode) for a struct as the plain
/// concatenation of the listed fields.
///
/// The wire format is positional, not tagged, so field order is a
/// format invariant: list the fields in declaration order, because
/// that order IS the encoding. Fields with irregular formats (names,
/// assets, varints) contribute their own overridden encoding — the
/// generated impl just recurses.
///
/// # Example
///
/// ```rust
/// use chainwire_codec::{decode_exact, encode_to_vec, wire_struct};
///
/// #[derive(Debug, PartialEq)]
/// struct BlockPosition {
///     block_num: u32,
///     offset: u16,
/// }
///
/// wire_struct!(BlockPosition { block_num, offset });
///
/// let pos = BlockPosition { block_num: 7, offset: 2 };
/// let bytes = encode_to_vec(&pos).unwrap();
/// assert_eq!(bytes, vec![7, 0, 0, 0, 2, 0]);
/// assert_eq!(decode_exact::<BlockPosition>(&bytes).unwrap(), pos);
/// ```
#[macro_export]
macro_rules! wire_struct {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::WireEncode for $ty {
            fn wire_encode(
                &self,
                enc: &mut $crate::Encoder,
            ) -> ::core::result::Result<(), $crate::CodecError> {
                $($crate::WireEncode::wire_encode(&self.$field, enc)?;)+
                Ok(())
            }
        }

        impl $crate::WireDecode for $ty {
            fn wire_decode(
                dec: &mut $crate::Decoder<'_>,
            ) -> ::core::result::Result<Self, $crate::CodecError> {
                Ok(Self {
                    $($field: $crate::WireDecode::wire_decode(dec)?,)+
                })
            }
        }
    };
}
