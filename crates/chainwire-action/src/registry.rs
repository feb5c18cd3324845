//! The process-wide map from (contract account, action name) to a
//! concrete payload type.
//!
//! The registry is a registry of *constructors*: registering a type
//! stores a monomorphized decode function, and resolution is an
//! explicit lookup — no runtime type introspection anywhere. Unknown
//! keys are a normal outcome, not a failure.
//!
//! # Lifecycle
//!
//! The shared [`ActionRegistry::global`] handle is expected to be
//! populated during process initialization, before decode traffic
//! begins, and treated as read-only afterwards. The interior `RwLock`
//! exists so that a late registration is merely slow, never a data
//! race; steady-state lookups only take the read side.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use chainwire_codec::{decode_from_slice, CodecError, WireDecode};
use chainwire_types::{AccountName, ActionName};

use crate::envelope::ActionPayload;

/// A monomorphized payload constructor: raw payload bytes in, boxed
/// concrete value out.
pub type PayloadCtor = fn(&[u8]) -> Result<Box<dyn ActionPayload>, CodecError>;

fn decode_ctor<T: ActionPayload + WireDecode>(
    bytes: &[u8],
) -> Result<Box<dyn ActionPayload>, CodecError> {
    // Lenient about trailing bytes: a contract may append fields to an
    // action after this type was written, and the known prefix still
    // decodes.
    let (value, _) = decode_from_slice::<T>(bytes)?;
    Ok(Box::new(value))
}

/// Write-once-per-key mapping from (account, action) to the concrete
/// payload type an envelope should decode into.
///
/// Re-registering a key overwrites it — last registration wins, and
/// there is no removal.
#[derive(Default)]
pub struct ActionRegistry {
    inner: RwLock<HashMap<(AccountName, ActionName), PayloadCtor>>,
}

impl ActionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by `Action`'s binary decode.
    ///
    /// Collaborators that register their contract types before decode
    /// traffic starts can rely on every subsequently decoded action
    /// resolving against them.
    pub fn global() -> &'static ActionRegistry {
        static GLOBAL: OnceLock<ActionRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ActionRegistry::new)
    }

    /// Registers `T` as the payload type for `(account, name)`,
    /// overwriting any previous registration for that key.
    pub fn register<T: ActionPayload + WireDecode>(
        &self,
        account: AccountName,
        name: ActionName,
    ) {
        tracing::debug!(account = %account, action = %name, "registered action type");
        self.inner
            .write()
            .expect("action registry lock poisoned")
            .insert((account, name), decode_ctor::<T>);
    }

    /// Looks up the constructor registered for `(account, name)`.
    pub fn lookup(
        &self,
        account: &AccountName,
        name: &ActionName,
    ) -> Option<PayloadCtor> {
        self.inner
            .read()
            .expect("action registry lock poisoned")
            .get(&(account.clone(), name.clone()))
            .copied()
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .expect("action registry lock poisoned")
            .len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("registered", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{SetCode, Transfer};

    fn key(a: &str, n: &str) -> (AccountName, ActionName) {
        (AccountName::from(a), ActionName::from(n))
    }

    #[test]
    fn test_lookup_miss_returns_none() {
        let reg = ActionRegistry::new();
        let (a, n) = key("eosio", "setcode");
        assert!(reg.lookup(&a, &n).is_none());
    }

    #[test]
    fn test_register_then_lookup() {
        let reg = ActionRegistry::new();
        let (a, n) = key("eosio", "setcode");
        reg.register::<SetCode>(a.clone(), n.clone());
        assert!(reg.lookup(&a, &n).is_some());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_last_registration_wins() {
        // Overwrite semantics: re-registering a key replaces the
        // constructor instead of erroring or appending.
        let reg = ActionRegistry::new();
        let (a, n) = key("eosio.token", "transfer");
        reg.register::<SetCode>(a.clone(), n.clone());
        reg.register::<Transfer>(a.clone(), n.clone());
        assert_eq!(reg.len(), 1);

        let ctor = reg.lookup(&a, &n).unwrap();
        // A 16-byte SetCode-ish blob is not a valid Transfer, so the
        // surviving constructor must be Transfer's.
        let bytes = [0u8; 16];
        assert!(ctor(&bytes).is_err());
    }
}
