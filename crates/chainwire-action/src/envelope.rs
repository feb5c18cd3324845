//! The action payload envelope.
//!
//! Payload bytes are opaque until the consumer knows which
//! contract+action produced them. The envelope holds them in one of
//! three explicit states instead of a bytes-plus-maybe-value sentinel:
//!
//! ```text
//! Raw(bytes) ──resolve/decode_as──▶ Decoded { raw, value }
//! Json(value) ──decode_as─────────▶ Decoded { raw, value }
//! ```
//!
//! `Decoded` is terminal for a round of processing; only an explicit
//! `decode_as` replaces the cached value (always allowed, never an
//! error). On every write path the decoded value wins over the raw
//! bytes it came from.

use std::any::Any;
use std::fmt;

use chainwire_codec::{
    decode_from_slice, encode_to_vec, CodecError, Decoder, Encoder,
    WireDecode, WireEncode,
};
use chainwire_types::{AccountName, ActionName, HexBytes};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ActionError, ActionRegistry};

/// The capability a concrete payload type needs to live inside an
/// envelope: binary-encodable, JSON-presentable, cloneable behind a
/// trait object, and downcastable back out.
///
/// Implemented automatically for any `WireEncode + Serialize + Debug +
/// Clone + Send + Sync` type — contract authors only derive/implement
/// the usual traits and registration does the rest.
pub trait ActionPayload: WireEncode + fmt::Debug + Send + Sync + 'static {
    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Clones the payload behind the trait object.
    fn clone_boxed(&self) -> Box<dyn ActionPayload>;

    /// The payload's JSON form.
    fn to_json(&self) -> Result<serde_json::Value, ActionError>;
}

impl<T> ActionPayload for T
where
    T: WireEncode + Serialize + fmt::Debug + Clone + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn ActionPayload> {
        Box::new(self.clone())
    }

    fn to_json(&self) -> Result<serde_json::Value, ActionError> {
        serde_json::to_value(self).map_err(ActionError::Json)
    }
}

impl Clone for Box<dyn ActionPayload> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

#[derive(Debug, Clone)]
enum PayloadRepr {
    /// Opaque bytes, as they arrived off the wire.
    Raw(HexBytes),
    /// A structured-but-untyped payload from the JSON decode path.
    Json(serde_json::Value),
    /// Resolved: the bytes plus the cached concrete value they
    /// decoded into.
    Decoded {
        raw: HexBytes,
        value: Box<dyn ActionPayload>,
    },
}

/// The opaque/typed dual-representation wrapper around an action's
/// payload bytes.
#[derive(Debug, Clone)]
pub struct ActionData {
    repr: PayloadRepr,
}

impl ActionData {
    /// Wraps raw payload bytes (the state after a binary decode).
    pub fn from_raw(bytes: impl Into<HexBytes>) -> Self {
        ActionData {
            repr: PayloadRepr::Raw(bytes.into()),
        }
    }

    /// Wraps an already-typed payload, capturing its encoding as the
    /// raw form so both representations exist from the start.
    ///
    /// # Errors
    /// Fails if the value itself cannot be encoded (e.g. an invalid
    /// identifier inside it).
    pub fn from_value<T: ActionPayload>(value: T) -> Result<Self, CodecError> {
        let raw = HexBytes(encode_to_vec(&value)?);
        Ok(ActionData {
            repr: PayloadRepr::Decoded {
                raw,
                value: Box::new(value),
            },
        })
    }

    /// Wraps a structured JSON payload for which no concrete type is
    /// known yet (the textual decode path).
    pub fn from_json(value: serde_json::Value) -> Self {
        ActionData {
            repr: PayloadRepr::Json(value),
        }
    }

    /// The raw payload bytes, if this envelope has a binary form.
    pub fn raw(&self) -> Option<&HexBytes> {
        match &self.repr {
            PayloadRepr::Raw(bytes) => Some(bytes),
            PayloadRepr::Decoded { raw, .. } => Some(raw),
            PayloadRepr::Json(_) => None,
        }
    }

    /// The cached decoded payload, if resolution has happened.
    pub fn decoded(&self) -> Option<&dyn ActionPayload> {
        match &self.repr {
            PayloadRepr::Decoded { value, .. } => Some(value.as_ref()),
            _ => None,
        }
    }

    /// The cached decoded payload as a concrete type.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.decoded().and_then(|v| v.as_any().downcast_ref())
    }

    /// Whether this envelope has been resolved to a concrete value.
    pub fn is_resolved(&self) -> bool {
        matches!(self.repr, PayloadRepr::Decoded { .. })
    }

    /// Resolves the payload against the registry using the enclosing
    /// action's account and name.
    ///
    /// Resolution happens at most once: an already-resolved envelope is
    /// left untouched. An unregistered key is *not* an error — the
    /// envelope simply stays raw, since many payloads belong to
    /// unknown actions and the raw form is all the caller wants.
    ///
    /// # Errors
    /// Only a failed decode of a *registered* type is an error.
    pub fn resolve(
        &mut self,
        account: &AccountName,
        name: &ActionName,
        registry: &ActionRegistry,
    ) -> Result<(), CodecError> {
        let PayloadRepr::Raw(bytes) = &self.repr else {
            return Ok(());
        };
        let Some(ctor) = registry.lookup(account, name) else {
            return Ok(());
        };
        let value = ctor(bytes.as_slice())?;
        self.repr = PayloadRepr::Decoded {
            raw: bytes.clone(),
            value,
        };
        Ok(())
    }

    /// Force-decodes into `T` regardless of registry state, replacing
    /// any previously cached value. Always allowed — re-decoding a
    /// resolved envelope is a deliberate, permissive operation.
    ///
    /// Decodes from the JSON form when that is what the envelope
    /// holds, from the raw binary otherwise.
    ///
    /// # Errors
    /// Fails when the bytes (or JSON) do not parse as `T`.
    pub fn decode_as<T>(&mut self) -> Result<T, ActionError>
    where
        T: ActionPayload + WireDecode + DeserializeOwned + Clone,
    {
        let (value, raw): (T, HexBytes) = match &self.repr {
            PayloadRepr::Json(json) => {
                let value: T = serde_json::from_value(json.clone())
                    .map_err(ActionError::Json)?;
                let raw = HexBytes(encode_to_vec(&value)?);
                (value, raw)
            }
            PayloadRepr::Raw(bytes) => {
                let (value, _) = decode_from_slice::<T>(bytes.as_slice())?;
                (value, bytes.clone())
            }
            PayloadRepr::Decoded { raw, .. } => {
                let (value, _) = decode_from_slice::<T>(raw.as_slice())?;
                (value, raw.clone())
            }
        };
        self.repr = PayloadRepr::Decoded {
            raw,
            value: Box::new(value.clone()),
        };
        Ok(value)
    }

    /// The payload bytes to put on the wire. The decoded value wins:
    /// a resolved envelope re-encodes its cached value rather than
    /// replaying possibly stale raw bytes.
    ///
    /// # Errors
    /// A JSON-held payload has no binary form until `decode_as` gives
    /// it a concrete type.
    pub fn encoded_payload(&self) -> Result<Vec<u8>, CodecError> {
        match &self.repr {
            PayloadRepr::Decoded { value, .. } => {
                let mut enc = Encoder::new();
                value.wire_encode(&mut enc)?;
                Ok(enc.into_bytes())
            }
            PayloadRepr::Raw(bytes) => Ok(bytes.0.clone()),
            PayloadRepr::Json(_) => Err(CodecError::InvalidFormat(
                "action payload held as JSON has no binary form without a \
                 concrete type"
                    .to_string(),
            )),
        }
    }

    /// The payload's textual form: the decoded value directly when
    /// resolved, the raw bytes as a hex string otherwise. There is no
    /// implicit binary→textual promotion without a registered type.
    pub fn to_json(&self) -> Result<serde_json::Value, ActionError> {
        match &self.repr {
            PayloadRepr::Decoded { value, .. } => value.to_json(),
            PayloadRepr::Raw(bytes) => {
                Ok(serde_json::Value::String(bytes.to_string()))
            }
            PayloadRepr::Json(json) => Ok(json.clone()),
        }
    }
}

impl Default for ActionData {
    fn default() -> Self {
        ActionData::from_raw(Vec::new())
    }
}

impl PartialEq for ActionData {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (PayloadRepr::Json(a), PayloadRepr::Json(b)) => a == b,
            _ => match (self.encoded_payload(), other.encoded_payload()) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl WireEncode for ActionData {
    fn wire_encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.push_bytes(&self.encoded_payload()?)
    }
}

impl WireDecode for ActionData {
    fn wire_decode(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(ActionData::from_raw(dec.read_bytes()?.to_vec()))
    }
}

// Textual surface: a resolved envelope serializes its value, an
// unresolved one its hex bytes; input accepts either shape.
impl Serialize for ActionData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let json = self.to_json().map_err(serde::ser::Error::custom)?;
        json.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ActionData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if let serde_json::Value::String(s) = &value {
            if let Ok(bytes) = s.parse::<HexBytes>() {
                return Ok(ActionData::from_raw(bytes.0));
            }
        }
        Ok(ActionData::from_json(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{SetCode, Transfer};
    use chainwire_types::Asset;

    fn transfer() -> Transfer {
        Transfer {
            from: AccountName::from("alice"),
            to: AccountName::from("bob"),
            quantity: Asset::eos(10_000),
            memo: "hi".into(),
        }
    }

    #[test]
    fn test_from_value_has_both_representations() {
        let data = ActionData::from_value(transfer()).unwrap();
        assert!(data.is_resolved());
        assert!(data.raw().is_some());
        assert_eq!(data.downcast_ref::<Transfer>().unwrap(), &transfer());
    }

    #[test]
    fn test_resolve_with_unregistered_key_stays_raw() {
        let registry = ActionRegistry::new();
        let mut data = ActionData::from_raw(vec![1, 2, 3]);
        data.resolve(
            &AccountName::from("nobody"),
            &ActionName::from("nothing"),
            &registry,
        )
        .unwrap();
        assert!(!data.is_resolved());
        assert_eq!(data.raw().unwrap().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_resolve_with_registered_key_decodes_once() {
        let registry = ActionRegistry::new();
        registry.register::<Transfer>(
            AccountName::from("eosio.token"),
            ActionName::from("transfer"),
        );

        let raw = encode_to_vec(&transfer()).unwrap();
        let mut data = ActionData::from_raw(raw);
        data.resolve(
            &AccountName::from("eosio.token"),
            &ActionName::from("transfer"),
            &registry,
        )
        .unwrap();

        assert!(data.is_resolved());
        assert_eq!(data.downcast_ref::<Transfer>().unwrap(), &transfer());

        // A second resolve is a no-op, not a re-decode.
        data.resolve(
            &AccountName::from("eosio.token"),
            &ActionName::from("transfer"),
            &registry,
        )
        .unwrap();
        assert_eq!(data.downcast_ref::<Transfer>().unwrap(), &transfer());
    }

    #[test]
    fn test_resolve_decode_failure_is_an_error() {
        let registry = ActionRegistry::new();
        registry.register::<Transfer>(
            AccountName::from("eosio.token"),
            ActionName::from("transfer"),
        );

        let mut data = ActionData::from_raw(vec![0xff; 3]);
        assert!(data
            .resolve(
                &AccountName::from("eosio.token"),
                &ActionName::from("transfer"),
                &registry,
            )
            .is_err());
    }

    #[test]
    fn test_decode_as_replaces_cached_value() {
        // Two decodes with different targets: the envelope must
        // reflect the most recent call, never a mix.
        let set_code = SetCode {
            account: AccountName::from("eosio"),
            vm_type: 0,
            vm_version: 0,
            code: HexBytes(vec![0xaa]),
        };
        let raw = encode_to_vec(&set_code).unwrap();
        let mut data = ActionData::from_raw(raw);

        let first: SetCode = data.decode_as().unwrap();
        assert_eq!(first, set_code);
        assert!(data.downcast_ref::<SetCode>().is_some());

        // SetCode's prefix happens to decode as a SetAbi-shaped type
        // too; after this call only the new value is cached.
        let _second: crate::system::SetAbi = data.decode_as().unwrap();
        assert!(data.downcast_ref::<SetCode>().is_none());
        assert!(data.downcast_ref::<crate::system::SetAbi>().is_some());
    }

    #[test]
    fn test_decode_as_from_json_representation() {
        let json = serde_json::json!({
            "from": "alice",
            "to": "bob",
            "quantity": "1.0000 EOS",
            "memo": "hi",
        });
        let mut data = ActionData::from_json(json);
        assert!(data.raw().is_none());

        let value: Transfer = data.decode_as().unwrap();
        assert_eq!(value, transfer());
        // decode_as materialized the binary form as well.
        assert_eq!(
            data.raw().unwrap().as_slice(),
            encode_to_vec(&transfer()).unwrap().as_slice()
        );
    }

    #[test]
    fn test_json_payload_has_no_binary_form() {
        let data = ActionData::from_json(serde_json::json!({"k": 1}));
        assert!(data.encoded_payload().is_err());
    }

    #[test]
    fn test_to_json_unresolved_is_hex_string() {
        let data = ActionData::from_raw(vec![0xde, 0xad]);
        assert_eq!(
            data.to_json().unwrap(),
            serde_json::Value::String("dead".into())
        );
    }

    #[test]
    fn test_to_json_resolved_is_the_value() {
        let data = ActionData::from_value(transfer()).unwrap();
        let json = data.to_json().unwrap();
        assert_eq!(json["from"], "alice");
        assert_eq!(json["quantity"], "1.0000 EOS");
    }

    #[test]
    fn test_wire_form_is_length_prefixed_blob() {
        let data = ActionData::from_raw(vec![0x01, 0x02]);
        let bytes = encode_to_vec(&data).unwrap();
        assert_eq!(bytes, vec![0x02, 0x01, 0x02]);
    }
}
