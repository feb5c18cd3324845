//! The action itself: target contract, action name, authorizations,
//! and the payload envelope.

use chainwire_codec::{
    CodecError, Decoder, Encoder, WireDecode, WireEncode,
};
use chainwire_types::{AccountName, ActionName, PermissionLevel};
use serde::{Deserialize, Serialize};

use crate::{ActionData, ActionRegistry};

/// One contract action, as carried inside transactions and blocks.
///
/// The payload is opaque at this level; the surrounding account/name
/// pair is the context the registry needs to give it a concrete type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Action {
    /// The contract account this action targets.
    pub account: AccountName,
    /// The action within that contract.
    pub name: ActionName,
    /// Who authorized the action, in order.
    #[serde(default)]
    pub authorization: Vec<PermissionLevel>,
    /// The payload envelope.
    pub data: ActionData,
}

impl WireEncode for Action {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        self.account.wire_encode(enc)?;
        self.name.wire_encode(enc)?;
        self.authorization.wire_encode(enc)?;
        self.data.wire_encode(enc)
    }
}

impl WireDecode for Action {
    /// Binary decode threads the just-read account/name into payload
    /// resolution against the global registry. An unregistered pair
    /// leaves the payload raw; only a failed decode of a registered
    /// type errors.
    ///
    /// The JSON decode path deliberately does *not* resolve — a
    /// structured `data` field stays in its JSON form until an
    /// explicit [`ActionData::decode_as`].
    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let account = AccountName::wire_decode(dec)?;
        let name = ActionName::wire_decode(dec)?;
        let authorization = Vec::<PermissionLevel>::wire_decode(dec)?;
        let mut data = ActionData::wire_decode(dec)?;

        data.resolve(&account, &name, ActionRegistry::global())?;

        Ok(Action {
            account,
            name,
            authorization,
            data,
        })
    }
}
