//! Chain domain types and their canonical wire encodings.
//!
//! Every type in this crate is a primitive of the chain's binary
//! format with an irregular, overridden encoding — the kinds the
//! generic engine in `chainwire-codec` cannot derive by field
//! concatenation:
//!
//! - **Identifiers** ([`Name`], [`AccountName`], [`ActionName`],
//!   [`PermissionName`], [`TableName`]) — base-32 strings packed into
//!   8 little-endian bytes.
//! - **Assets** ([`Asset`], [`Symbol`], [`CurrencyName`]) — 16-byte
//!   amount/precision/padded-code layout with a textual form.
//! - **Timestamps** ([`TimePointSec`], [`TimePoint`]) — 4-byte seconds
//!   and 8-byte nanoseconds variants.
//! - **Blobs** ([`HexBytes`], [`Checksum256`], [`PublicKey`]) —
//!   length-prefixed and fixed-width byte payloads, hex in JSON.
//! - **Authority structures** — plain compositions of the above.
//!
//! Each type carries both surfaces: the byte-exact wire form via
//! `WireEncode`/`WireDecode`, and the human-readable JSON form via
//! serde. The two are independent representations of the same value
//! and tests pin both.

mod asset;
mod authority;
mod bytes;
mod compression;
mod name;
mod time;

pub use asset::{Asset, CurrencyName, Symbol};
pub use authority::{
    Authority, KeyWeight, Permission, PermissionLevel, PermissionLevelWeight,
};
pub use bytes::{Checksum256, HexBytes, PublicKey, PUBLIC_KEY_LEN};
pub use compression::CompressionType;
pub use name::{
    name_to_string, string_to_name, AccountName, ActionName, Name,
    PermissionName, TableName, MAX_NAME_LEN,
};
pub use time::{TimePoint, TimePointSec};
