//! Error types for the codec layer.
//!
//! Each crate in chainwire defines its own error enum. This keeps errors
//! specific and meaningful — when you see a `CodecError`, you know the
//! problem is in the binary wire format, not in framing or registry
//! resolution.

/// Errors that can occur while encoding or decoding the canonical
/// binary format.
///
/// All of these are recoverable, value-level errors returned to the
/// immediate caller. None of them should be treated as fatal: a decode
/// failure on one field or one message leaves the process (and usually
/// the connection) perfectly usable.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The input ended before a field's full encoding was available.
    ///
    /// The wire format is positional, so a short field can never be
    /// silently truncated — decoding a structure must fail as soon as
    /// any field runs out of bytes.
    #[error("truncated input: needed {needed} byte(s), {available} available")]
    Truncated {
        /// How many bytes the current field still required.
        needed: usize,
        /// How many bytes were actually left in the input.
        available: usize,
    },

    /// A variable-length integer was malformed.
    ///
    /// Either the continuation bit never cleared within the maximum
    /// width, or the decoded value overflowed the target type.
    #[error("invalid varint: {0}")]
    InvalidVarint(&'static str),

    /// A length-prefixed string field did not contain valid UTF-8.
    #[error("invalid utf-8 in string field")]
    InvalidUtf8(#[source] std::string::FromUtf8Error),

    /// A decode was requested for a type that nothing registered.
    ///
    /// The message names the missing type so the caller can decide to
    /// skip the field or surface the problem — it is never
    /// process-fatal.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// A textual value failed to parse (asset string, name string,
    /// timestamp, hex blob, ...).
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A value was fully decoded but the input had bytes left over.
    ///
    /// Only returned by [`decode_exact`](crate::decode_exact); the
    /// cursor-based entry points report consumed length instead.
    #[error("decoded value used {consumed} byte(s) but input was {total} byte(s)")]
    TrailingBytes {
        /// Bytes consumed by the decode.
        consumed: usize,
        /// Total bytes in the input.
        total: usize,
    },

    /// A blob or collection was too large for its length prefix.
    #[error("value too large for length-prefixed encoding: {0} items")]
    Oversize(usize),
}
