//! The 8-byte textual identifier family and its string↔u64 codec.
//!
//! Account, action, permission, and table identifiers all travel as a
//! single little-endian `u64` on the wire, packed from a bounded
//! base-32 string. The packing is part of the chain's consensus rules,
//! so both directions here follow the canonical algorithm exactly:
//!
//! - alphabet `.12345abcdefghijklmnopqrstuvwxyz` (`.` is the zero
//!   symbol and doubles as padding),
//! - at most 13 characters,
//! - characters 1–12 take 5 bits each, packed from the highest bits
//!   down; the 13th character gets the remaining 4 bits and is limited
//!   to the first 16 symbols.

use std::fmt;
use std::str::FromStr;

use chainwire_codec::{CodecError, Decoder, Encoder, WireDecode, WireEncode};
use serde::{Deserialize, Serialize};

/// Longest representable identifier (12 full characters + 1 narrow).
pub const MAX_NAME_LEN: usize = 13;

const NAME_ALPHABET: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some(u64::from(c - b'a') + 6),
        b'1'..=b'5' => Some(u64::from(c - b'1') + 1),
        b'.' => Some(0),
        _ => None,
    }
}

/// Packs a textual identifier into its canonical `u64` form.
///
/// # Errors
/// Fails with [`CodecError::InvalidFormat`] when the string is longer
/// than 13 characters, contains a character outside the name alphabet,
/// or uses a 13th character beyond the narrow 4-bit range (`.` to `j`).
pub fn string_to_name(s: &str) -> Result<u64, CodecError> {
    let bytes = s.as_bytes();
    if bytes.len() > MAX_NAME_LEN {
        return Err(CodecError::InvalidFormat(format!(
            "name \"{s}\" is longer than {MAX_NAME_LEN} characters"
        )));
    }

    let mut value: u64 = 0;
    for (i, &c) in bytes.iter().enumerate() {
        let sym = char_to_symbol(c).ok_or_else(|| {
            CodecError::InvalidFormat(format!(
                "invalid character '{}' in name \"{s}\"",
                c as char
            ))
        })?;
        if i < 12 {
            value |= (sym & 0x1f) << (64 - 5 * (i + 1));
        } else {
            // The last slot only has 4 bits left.
            if sym > 0x0f {
                return Err(CodecError::InvalidFormat(format!(
                    "13th character '{}' of name \"{s}\" is out of range",
                    c as char
                )));
            }
            value |= sym;
        }
    }
    Ok(value)
}

/// Unpacks a canonical `u64` back into its textual identifier,
/// trimming the trailing padding dots.
pub fn name_to_string(value: u64) -> String {
    let mut out = [b'.'; MAX_NAME_LEN];
    let mut tmp = value;
    for i in 0..MAX_NAME_LEN {
        let (mask, shift) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
        out[MAX_NAME_LEN - 1 - i] = NAME_ALPHABET[(tmp & mask) as usize];
        tmp >>= shift;
    }
    let s: String = out.iter().map(|&b| b as char).collect();
    s.trim_end_matches('.').to_string()
}

macro_rules! name_type {
    ($(#[$meta:meta])* $ty:ident) => {
        $(#[$meta])*
        ///
        /// Wraps the textual form; the packed `u64` only exists on the
        /// wire. Construction does not validate — encoding does, so an
        /// identifier built from untrusted input fails at the codec
        /// boundary with a descriptive error.
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $ty(pub String);

        impl $ty {
            /// Wraps a textual identifier.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// The textual form.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl FromStr for $ty {
            type Err = CodecError;

            /// Validating constructor: rejects strings the name codec
            /// could not pack.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                string_to_name(s)?;
                Ok(Self(s.to_string()))
            }
        }

        impl WireEncode for $ty {
            fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
                enc.push_u64(string_to_name(&self.0)?);
                Ok(())
            }
        }

        impl WireDecode for $ty {
            const FIXED_SIZE: Option<usize> = Some(8);

            fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
                Ok(Self(name_to_string(dec.read_u64()?)))
            }
        }
    };
}

name_type!(
    /// A generic 13-character chain identifier.
    Name
);
name_type!(
    /// The identifier of an account (and of the contract deployed on it).
    AccountName
);
name_type!(
    /// The identifier of an action within a contract.
    ActionName
);
name_type!(
    /// The identifier of a permission level (`active`, `owner`, ...).
    PermissionName
);
name_type!(
    /// The identifier of a contract table.
    TableName
);

#[cfg(test)]
mod tests {
    use super::*;
    use chainwire_codec::{decode_exact, encode_to_vec};

    #[test]
    fn test_known_name_values() {
        // Values cross-checked against the chain's own packing.
        assert_eq!(string_to_name("").unwrap(), 0);
        assert_eq!(string_to_name("a").unwrap(), 0x3000_0000_0000_0000);
        assert_eq!(string_to_name("eosio").unwrap(), 0x5530_ea00_0000_0000);
        assert_eq!(
            string_to_name("eosio.token").unwrap(),
            0x5530_ea03_3482_a600
        );
    }

    #[test]
    fn test_round_trip_through_u64() {
        for name in ["eosio", "eosio.token", "abcdefghijklj", "a.b.c", "zzzzzzzzzzzz"] {
            let packed = string_to_name(name).unwrap();
            assert_eq!(name_to_string(packed), name, "name {name}");
        }
    }

    #[test]
    fn test_empty_name_round_trips() {
        assert_eq!(name_to_string(0), "");
    }

    #[test]
    fn test_too_long_name_rejected() {
        assert!(matches!(
            string_to_name("abcdefghijklmn"),
            Err(CodecError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_invalid_character_rejected() {
        for bad in ["UPPER", "has space", "nine9", "under_score"] {
            assert!(
                matches!(string_to_name(bad), Err(CodecError::InvalidFormat(_))),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_13th_character_narrow_range() {
        // 'j' is the last symbol that fits in 4 bits; 'k' is not.
        assert!(string_to_name("aaaaaaaaaaaaj").is_ok());
        assert!(matches!(
            string_to_name("aaaaaaaaaaaak"),
            Err(CodecError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_wire_form_is_8_le_bytes() {
        let account = AccountName::from("eosio");
        let bytes = encode_to_vec(&account).unwrap();
        assert_eq!(bytes, 0x5530_ea00_0000_0000_u64.to_le_bytes());

        let back: AccountName = decode_exact(&bytes).unwrap();
        assert_eq!(back, account);
    }

    #[test]
    fn test_encode_rejects_invalid_identifier() {
        let bad = AccountName::from("Not A Name");
        assert!(encode_to_vec(&bad).is_err());
    }

    #[test]
    fn test_json_form_is_plain_string() {
        let json = serde_json::to_string(&ActionName::from("transfer")).unwrap();
        assert_eq!(json, "\"transfer\"");

        let back: ActionName = serde_json::from_str("\"transfer\"").unwrap();
        assert_eq!(back.as_str(), "transfer");
    }

    #[test]
    fn test_from_str_validates() {
        assert!("eosio".parse::<AccountName>().is_ok());
        assert!("EOSIO".parse::<AccountName>().is_err());
    }
}
