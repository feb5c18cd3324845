//! Typed payloads for the message kinds this crate can decode.
//!
//! Frames for every kind can be read and relayed; only the kinds in
//! [`TypedMessage`] have a payload decoder here.

use std::fmt;

use chainwire_codec::{
    wire_struct, CodecError, Decoder, Encoder, WireDecode, WireEncode,
};
use chainwire_types::{Checksum256, TimePoint};

use crate::{MessageKind, PeerPayload};

/// The messages with a registered decode target, one variant per
/// decodable [`MessageKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedMessage {
    Time(TimeMessage),
    GoAway(GoAwayMessage),
    SyncRequest(SyncRequestMessage),
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Clock-sync probe, NTP style: each side stamps the message on the
/// way through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeMessage {
    /// Origin timestamp set by the sender of the request.
    pub org: TimePoint,
    /// Receive timestamp set by the peer when the request arrived.
    pub rec: TimePoint,
    /// Transmit timestamp set by the peer when the reply left.
    pub xmt: TimePoint,
    /// Destination timestamp set locally when the reply arrived.
    pub dst: TimePoint,
}

wire_struct!(TimeMessage { org, rec, xmt, dst });

impl PeerPayload for TimeMessage {
    const KIND: MessageKind = MessageKind::Time;
}

// ---------------------------------------------------------------------------
// Go-away
// ---------------------------------------------------------------------------

/// Reason code carried by a go-away message.
///
/// A newtype rather than an enum: peers running newer protocol
/// revisions may send codes we have no name for, and an unknown
/// reason must still frame-decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoAwayReason(pub u8);

impl GoAwayReason {
    pub const NO_REASON: GoAwayReason = GoAwayReason(0);
    pub const SELF_CONNECT: GoAwayReason = GoAwayReason(1);
    pub const DUPLICATE: GoAwayReason = GoAwayReason(2);
    pub const WRONG_CHAIN: GoAwayReason = GoAwayReason(3);
    pub const WRONG_VERSION: GoAwayReason = GoAwayReason(4);
    pub const FORKED: GoAwayReason = GoAwayReason(5);
    pub const UNLINKABLE: GoAwayReason = GoAwayReason(6);
    pub const BAD_TRANSACTION: GoAwayReason = GoAwayReason(7);
    pub const VALIDATION: GoAwayReason = GoAwayReason(8);
    pub const AUTHENTICATION: GoAwayReason = GoAwayReason(9);
    pub const FATAL_OTHER: GoAwayReason = GoAwayReason(10);
    pub const BENIGN_OTHER: GoAwayReason = GoAwayReason(11);

    /// Reason name for logs; unknown codes render as `unknown`.
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "no reason",
            1 => "self connect",
            2 => "duplicate",
            3 => "wrong chain",
            4 => "wrong version",
            5 => "chain is forked",
            6 => "unlinkable block received",
            7 => "bad transaction",
            8 => "invalid block",
            9 => "authentication failure",
            10 => "some other failure",
            11 => "some other non-fatal condition",
            _ => "unknown",
        }
    }
}

impl fmt::Display for GoAwayReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

impl WireEncode for GoAwayReason {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.push_u8(self.0);
        Ok(())
    }
}

impl WireDecode for GoAwayReason {
    const FIXED_SIZE: Option<usize> = Some(1);

    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(GoAwayReason(dec.read_u8()?))
    }
}

/// Sent by a peer about to drop the connection, naming the reason and
/// the sender's node id so the remote side can log who left and why.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoAwayMessage {
    /// Why the peer is leaving.
    pub reason: GoAwayReason,
    /// Node id of the departing peer.
    pub node_id: Checksum256,
}

wire_struct!(GoAwayMessage { reason, node_id });

impl PeerPayload for GoAwayMessage {
    const KIND: MessageKind = MessageKind::GoAway;
}

// ---------------------------------------------------------------------------
// Sync request
// ---------------------------------------------------------------------------

/// Asks a peer to send the signed blocks in an inclusive block-number
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncRequestMessage {
    /// First block wanted.
    pub start_block: u32,
    /// Last block wanted, inclusive.
    pub end_block: u32,
}

wire_struct!(SyncRequestMessage {
    start_block,
    end_block,
});

impl PeerPayload for SyncRequestMessage {
    const KIND: MessageKind = MessageKind::SyncRequest;
}
