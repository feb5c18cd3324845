//! Payload types for the hard-coded system and token actions.
//!
//! These are ordinary registered payloads — nothing here is special
//! to the envelope machinery, they are just the actions every chain
//! deployment has.

use chainwire_codec::wire_struct;
use chainwire_types::{AccountName, Asset, Authority, HexBytes};
use serde::{Deserialize, Serialize};

use crate::ActionRegistry;

/// The `setcode` system action: deploy contract code to an account.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetCode {
    /// Account receiving the code.
    pub account: AccountName,
    /// Virtual machine type (0 for WASM).
    pub vm_type: u8,
    /// Virtual machine version.
    pub vm_version: u8,
    /// The compiled contract bytes.
    pub code: HexBytes,
}

wire_struct!(SetCode {
    account,
    vm_type,
    vm_version,
    code,
});

/// The `setabi` system action: attach a packed ABI to an account.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetAbi {
    /// Account receiving the ABI.
    pub account: AccountName,
    /// The packed ABI bytes.
    pub abi: HexBytes,
}

wire_struct!(SetAbi { account, abi });

/// The `newaccount` system action: create an account with its initial
/// authorities.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewAccount {
    /// The creating account.
    pub creator: AccountName,
    /// The account being created.
    pub name: AccountName,
    /// Initial owner authority.
    pub owner: Authority,
    /// Initial active authority.
    pub active: Authority,
    /// Initial recovery authority.
    pub recovery: Authority,
}

wire_struct!(NewAccount {
    creator,
    name,
    owner,
    active,
    recovery,
});

/// The token contract's `transfer` action.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transfer {
    /// Sending account.
    pub from: AccountName,
    /// Receiving account.
    pub to: AccountName,
    /// Amount and currency moved.
    pub quantity: Asset,
    /// Free-form note, at most 256 bytes by convention.
    pub memo: String,
}

wire_struct!(Transfer {
    from,
    to,
    quantity,
    memo,
});

/// Registers the well-known system and token actions. Call once
/// during initialization, before decode traffic begins.
pub fn register_system_actions(registry: &ActionRegistry) {
    let eosio = AccountName::from("eosio");
    registry.register::<SetCode>(eosio.clone(), "setcode".into());
    registry.register::<SetAbi>(eosio.clone(), "setabi".into());
    registry.register::<NewAccount>(eosio, "newaccount".into());
    registry.register::<Transfer>("eosio.token".into(), "transfer".into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainwire_codec::{decode_exact, encode_to_vec};
    use chainwire_types::ActionName;

    #[test]
    fn test_register_system_actions_covers_all_four() {
        let registry = ActionRegistry::new();
        register_system_actions(&registry);
        assert_eq!(registry.len(), 4);
        assert!(registry
            .lookup(
                &AccountName::from("eosio"),
                &ActionName::from("newaccount")
            )
            .is_some());
    }

    #[test]
    fn test_set_code_round_trip() {
        let v = SetCode {
            account: AccountName::from("hello"),
            vm_type: 0,
            vm_version: 0,
            code: HexBytes(vec![0x00, 0x61, 0x73, 0x6d]),
        };
        let bytes = encode_to_vec(&v).unwrap();
        assert_eq!(decode_exact::<SetCode>(&bytes).unwrap(), v);
    }

    #[test]
    fn test_transfer_round_trip() {
        let v = Transfer {
            from: AccountName::from("alice"),
            to: AccountName::from("bob"),
            quantity: Asset::eos(10_000),
            memo: "memo".into(),
        };
        let bytes = encode_to_vec(&v).unwrap();
        // from (8) + to (8) + asset (16) + memo (1 + 4).
        assert_eq!(bytes.len(), 37);
        assert_eq!(decode_exact::<Transfer>(&bytes).unwrap(), v);
    }

    #[test]
    fn test_new_account_round_trip() {
        let v = NewAccount {
            creator: AccountName::from("eosio"),
            name: AccountName::from("alice"),
            ..NewAccount::default()
        };
        let bytes = encode_to_vec(&v).unwrap();
        assert_eq!(decode_exact::<NewAccount>(&bytes).unwrap(), v);
    }
}
