//! # Chainwire
//!
//! Binary wire codec and peer message framing for EOS-style chains.
//!
//! This meta-crate re-exports the working set from the sub-crates:
//!
//! - `chainwire-codec` — the generic binary codec engine
//!   ([`WireEncode`](prelude::WireEncode) /
//!   [`WireDecode`](prelude::WireDecode), little-endian integers,
//!   varint-prefixed blobs)
//! - `chainwire-types` — chain value types (names, assets,
//!   timestamps, checksums, authorities)
//! - `chainwire-action` — action envelopes and the payload registry
//! - `chainwire-p2p` — length-prefixed peer message framing
//!
//! ## Quick Start
//!
//! ```rust
//! use chainwire::prelude::*;
//!
//! # fn main() -> Result<(), ChainwireError> {
//! // Register the built-in payload types once at startup.
//! register_system_actions(ActionRegistry::global());
//!
//! // Encode a transfer the way it travels inside a transaction.
//! let transfer = Transfer {
//!     from: AccountName::from("alice"),
//!     to: AccountName::from("bob"),
//!     quantity: "1.0000 EOS".parse()?,
//!     memo: String::new(),
//! };
//! let bytes = encode_to_vec(&transfer)?;
//! assert_eq!(bytes.len(), 33);
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::ChainwireError;

/// One-stop imports for the common case.
pub mod prelude {
    pub use chainwire_codec::{
        decode_exact, decode_from_slice, encode_to_vec, CodecError,
        Decoder, Encoder, Varuint32, WireDecode, WireEncode,
    };
    pub use chainwire_types::{
        AccountName, ActionName, Asset, Authority, Checksum256,
        CompressionType, HexBytes, Name, PermissionLevel, PermissionName,
        PublicKey, Symbol, TimePoint, TimePointSec,
    };
    pub use chainwire_action::{
        register_system_actions, Action, ActionData, ActionPayload,
        ActionRegistry, Transfer,
    };
    pub use chainwire_p2p::{
        read_message, GoAwayMessage, MessageKind, P2pError, P2pMessage,
        PeerPayload, SyncRequestMessage, TimeMessage, TypedMessage,
    };
    pub use crate::ChainwireError;
}

/// Installs a `tracing` subscriber reading its filter from
/// `RUST_LOG`, defaulting to `info`. Does nothing if a subscriber is
/// already installed.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
