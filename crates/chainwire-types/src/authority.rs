//! Authority structures: who may sign for an account, and with what
//! weight.
//!
//! These are plain field-concatenation structures — `wire_struct!`
//! handles the wire format, serde handles the JSON form. The only
//! irregular piece is the [`PublicKey`] inside [`KeyWeight`], which
//! carries its own overridden encoding.

use chainwire_codec::wire_struct;
use serde::{Deserialize, Serialize};

use crate::{AccountName, PermissionName, PublicKey};

/// One actor@permission pair, as carried in action authorizations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionLevel {
    /// The authorizing account.
    pub actor: AccountName,
    /// The permission level used (`active`, `owner`, ...).
    pub permission: PermissionName,
}

wire_struct!(PermissionLevel { actor, permission });

/// A permission level with its voting weight inside an authority.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionLevelWeight {
    /// The delegated permission.
    pub permission: PermissionLevel,
    /// Weight contributed toward the authority's threshold.
    pub weight: u16,
}

wire_struct!(PermissionLevelWeight { permission, weight });

/// A public key with its voting weight inside an authority.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyWeight {
    /// The signing key.
    pub public_key: PublicKey,
    /// Weight contributed toward the authority's threshold.
    pub weight: u16,
}

wire_struct!(KeyWeight { public_key, weight });

/// The full signing requirement for a permission: a threshold that
/// must be met by some combination of keys and delegated accounts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Authority {
    /// Total weight that must be reached.
    pub threshold: u32,
    /// Keys that can contribute weight.
    pub keys: Vec<KeyWeight>,
    /// Other accounts' permissions that can contribute weight.
    pub accounts: Vec<PermissionLevelWeight>,
}

wire_struct!(Authority {
    threshold,
    keys,
    accounts,
});

/// A named permission slot on an account, with its parent link and
/// required authority.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permission {
    /// Name of this permission.
    pub perm_name: String,
    /// Name of the parent permission (empty for `owner`).
    pub parent: String,
    /// What it takes to satisfy this permission.
    pub required_auth: Authority,
}

wire_struct!(Permission {
    perm_name,
    parent,
    required_auth,
});

#[cfg(test)]
mod tests {
    use super::*;
    use chainwire_codec::{decode_exact, encode_to_vec};

    fn sample_authority() -> Authority {
        Authority {
            threshold: 2,
            keys: vec![KeyWeight {
                public_key: PublicKey::default(),
                weight: 1,
            }],
            accounts: vec![PermissionLevelWeight {
                permission: PermissionLevel {
                    actor: AccountName::from("eosio"),
                    permission: PermissionName::from("active"),
                },
                weight: 1,
            }],
        }
    }

    #[test]
    fn test_permission_level_wire_is_two_names() {
        let pl = PermissionLevel {
            actor: AccountName::from("eosio"),
            permission: PermissionName::from("active"),
        };
        let bytes = encode_to_vec(&pl).unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(decode_exact::<PermissionLevel>(&bytes).unwrap(), pl);
    }

    #[test]
    fn test_authority_round_trip() {
        let auth = sample_authority();
        let bytes = encode_to_vec(&auth).unwrap();
        let back: Authority = decode_exact(&bytes).unwrap();
        assert_eq!(back, auth);
    }

    #[test]
    fn test_empty_authority_wire_layout() {
        // threshold (4) + two empty varint-counted lists (1 + 1).
        let auth = Authority {
            threshold: 1,
            keys: vec![],
            accounts: vec![],
        };
        let bytes = encode_to_vec(&auth).unwrap();
        assert_eq!(bytes, vec![1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_authority_json_field_names() {
        let json = serde_json::to_value(sample_authority()).unwrap();
        assert_eq!(json["threshold"], 2);
        assert_eq!(json["keys"][0]["weight"], 1);
        assert_eq!(json["accounts"][0]["permission"]["actor"], "eosio");
    }

    #[test]
    fn test_permission_round_trip() {
        let p = Permission {
            perm_name: "active".into(),
            parent: "owner".into(),
            required_auth: sample_authority(),
        };
        let bytes = encode_to_vec(&p).unwrap();
        assert_eq!(decode_exact::<Permission>(&bytes).unwrap(), p);
    }
}
