use chainwire_codec::CodecError;

use crate::MessageKind;

/// Errors that can occur while framing or decoding peer messages.
#[derive(Debug, thiserror::Error)]
pub enum P2pError {
    /// The type tag is not one of the ten known values.
    #[error("unknown message type tag {0}")]
    UnknownMessageType(u8),

    /// The declared message length is zero. A message always carries
    /// at least the one-byte type tag.
    #[error("message length of zero (no type tag)")]
    EmptyMessage,

    /// The declared message length exceeds the sanity cap.
    #[error("message length {length} exceeds the {max}-byte cap")]
    OversizeMessage {
        /// The length the frame declared.
        length: usize,
        /// The cap it was checked against.
        max: usize,
    },

    /// The stream ended before a full frame was read.
    #[error("stream ended mid-message (needed {needed} more bytes)")]
    IncompleteRead {
        /// Bytes still owed by the stream when it ended.
        needed: usize,
    },

    /// A typed decode was requested for a kind other than the frame's.
    #[error("message is {actual}, not {expected}")]
    TypeMismatch {
        /// The kind the caller asked for.
        expected: MessageKind,
        /// The kind the frame actually carries.
        actual: MessageKind,
    },

    /// The kind is valid for framing but has no decode target here.
    #[error("no decode target for {0} messages")]
    NoDecodeTarget(MessageKind),

    /// The payload bytes did not decode as the expected type.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The underlying stream failed.
    #[error("stream error: {0}")]
    Io(#[source] std::io::Error),
}
