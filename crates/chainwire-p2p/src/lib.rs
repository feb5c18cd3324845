//! # chainwire-p2p
//!
//! Length-prefixed, type-tagged framing for the peer protocol.
//!
//! Every frame on the wire is `[4-byte LE length][1-byte type
//! tag][length - 1 bytes payload]` — the tag byte is counted in the
//! length. [`read_message`] pulls one frame off a blocking byte
//! stream and validates the tag before anything touches the payload;
//! the payload itself stays as raw bytes until the caller asks for a
//! typed decode.
//!
//! Only a subset of the ten tags has a typed payload here (see
//! [`TypedMessage`]). The rest are framing-only: their frames can be
//! read, relayed, and re-encoded, but [`P2pMessage::as_typed`]
//! reports [`P2pError::NoDecodeTarget`] for them.
//!
//! # Feature Flags
//!
//! - `tcp` (default) — async [`PeerConnection`] over `tokio` TCP

mod error;
mod messages;
#[cfg(feature = "tcp")]
mod tcp;

pub use error::P2pError;
pub use messages::{
    GoAwayMessage, GoAwayReason, SyncRequestMessage, TimeMessage,
    TypedMessage,
};
#[cfg(feature = "tcp")]
pub use tcp::PeerConnection;

use std::fmt;
use std::io::Read;

use chainwire_codec::{
    decode_exact, encode_to_vec, CodecError, WireDecode, WireEncode,
};

// ---------------------------------------------------------------------------
// Message kinds
// ---------------------------------------------------------------------------

/// The closed set of peer message type tags.
///
/// The numeric values are the wire tags and must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageKind {
    Handshake = 0,
    GoAway = 1,
    Time = 2,
    Notice = 3,
    Request = 4,
    SyncRequest = 5,
    SignedBlockSummary = 6,
    SignedBlock = 7,
    SignedTransaction = 8,
    PackedTransaction = 9,
}

impl MessageKind {
    /// Validates a raw tag byte.
    pub fn try_from_tag(tag: u8) -> Result<Self, P2pError> {
        Ok(match tag {
            0 => MessageKind::Handshake,
            1 => MessageKind::GoAway,
            2 => MessageKind::Time,
            3 => MessageKind::Notice,
            4 => MessageKind::Request,
            5 => MessageKind::SyncRequest,
            6 => MessageKind::SignedBlockSummary,
            7 => MessageKind::SignedBlock,
            8 => MessageKind::SignedTransaction,
            9 => MessageKind::PackedTransaction,
            other => return Err(P2pError::UnknownMessageType(other)),
        })
    }

    /// The wire tag byte.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Human-readable kind name, as it appears in logs.
    pub fn name(self) -> &'static str {
        match self {
            MessageKind::Handshake => "handshake",
            MessageKind::GoAway => "go-away",
            MessageKind::Time => "time",
            MessageKind::Notice => "notice",
            MessageKind::Request => "request",
            MessageKind::SyncRequest => "sync-request",
            MessageKind::SignedBlockSummary => "signed-block-summary",
            MessageKind::SignedBlock => "signed-block",
            MessageKind::SignedTransaction => "signed-transaction",
            MessageKind::PackedTransaction => "packed-transaction",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

/// A single peer protocol frame: a validated kind plus the raw
/// payload bytes. Terminal once constructed; decoding the payload
/// does not mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct P2pMessage {
    /// The validated message kind.
    pub kind: MessageKind,
    /// Payload bytes, excluding the tag byte.
    pub payload: Vec<u8>,
}

/// A payload type that travels under a fixed message kind.
pub trait PeerPayload: WireEncode + WireDecode {
    /// The tag this payload travels under.
    const KIND: MessageKind;
}

impl P2pMessage {
    /// Builds a frame from a typed payload.
    pub fn from_payload<T: PeerPayload>(value: &T) -> Result<Self, P2pError> {
        Ok(P2pMessage {
            kind: T::KIND,
            payload: encode_to_vec(value)?,
        })
    }

    /// Decodes the payload as `T`, checking the kind first.
    ///
    /// The payload must be consumed exactly; trailing bytes are an
    /// encoding error, not ignorable padding.
    pub fn decode_payload<T: PeerPayload>(&self) -> Result<T, P2pError> {
        if self.kind != T::KIND {
            return Err(P2pError::TypeMismatch {
                expected: T::KIND,
                actual: self.kind,
            });
        }
        Ok(decode_exact(&self.payload)?)
    }

    /// Decodes the payload into the closed [`TypedMessage`] set.
    pub fn as_typed(&self) -> Result<TypedMessage, P2pError> {
        match self.kind {
            MessageKind::Time => {
                Ok(TypedMessage::Time(self.decode_payload()?))
            }
            MessageKind::GoAway => {
                Ok(TypedMessage::GoAway(self.decode_payload()?))
            }
            MessageKind::SyncRequest => {
                Ok(TypedMessage::SyncRequest(self.decode_payload()?))
            }
            other => Err(P2pError::NoDecodeTarget(other)),
        }
    }

    /// Encodes the full frame: length (payload + tag byte), tag,
    /// payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>, P2pError> {
        let length = u32::try_from(self.payload.len() + 1)
            .map_err(|_| CodecError::Oversize(self.payload.len()))?;
        let mut out = Vec::with_capacity(5 + self.payload.len());
        out.extend_from_slice(&length.to_le_bytes());
        out.push(self.kind.tag());
        out.extend_from_slice(&self.payload);
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Blocking stream framer
// ---------------------------------------------------------------------------

/// Fills `buf` from the stream, retrying on interrupts. End-of-stream
/// before the buffer is full is an incomplete read.
fn read_full(stream: &mut impl Read, buf: &mut [u8]) -> Result<(), P2pError> {
    let mut filled = 0;
    while filled < buf.len() {
        match stream.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(P2pError::IncompleteRead {
                    needed: buf.len() - filled,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(P2pError::Io(e)),
        }
    }
    Ok(())
}

/// Largest frame `read_message` will buffer. The length prefix comes
/// from an untrusted peer; without a cap a single bogus frame asks
/// for a 4 GiB allocation.
pub const MAX_MESSAGE_LEN: usize = 64 * 1024 * 1024;

/// Validates a declared frame length before anything is allocated
/// for it.
fn check_length(length: usize) -> Result<(), P2pError> {
    if length == 0 {
        return Err(P2pError::EmptyMessage);
    }
    if length > MAX_MESSAGE_LEN {
        return Err(P2pError::OversizeMessage {
            length,
            max: MAX_MESSAGE_LEN,
        });
    }
    Ok(())
}

/// Reads one frame off a blocking byte stream.
///
/// Blocks until a whole frame is available. A declared length of zero
/// fails immediately (a message always carries its tag byte), one
/// beyond [`MAX_MESSAGE_LEN`] is rejected before it is buffered, and
/// an unknown tag is rejected before the payload is handed to
/// anything.
pub fn read_message(stream: &mut impl Read) -> Result<P2pMessage, P2pError> {
    let mut len_bytes = [0u8; 4];
    read_full(stream, &mut len_bytes)?;
    let length = u32::from_le_bytes(len_bytes) as usize;
    check_length(length)?;

    let mut body = vec![0u8; length];
    read_full(stream, &mut body)?;

    let kind = MessageKind::try_from_tag(body[0])?;
    let payload = body[1..].to_vec();
    tracing::trace!(kind = %kind, payload_len = payload.len(), "read frame");

    Ok(P2pMessage { kind, payload })
}
