//! # chainwire-action
//!
//! Action envelopes and the payload type registry.
//!
//! An [`Action`] names a contract account, an action name, the
//! authorizations approving it, and an opaque payload. The payload
//! travels as raw bytes on the wire; this crate resolves it into a
//! typed value when the `(account, name)` pair has a registered
//! payload type, and leaves it as raw bytes otherwise.
//!
//! ## The resolution pipeline
//!
//! ```text
//!   wire bytes ──> ActionData (raw) ──lookup──> ActionData (decoded)
//!                        │                            │
//!                        └── hex JSON                 └── structured JSON
//! ```
//!
//! Registration is explicit: call [`ActionRegistry::register`] for
//! each payload type (or [`register_system_actions`] for the built-in
//! set) before decoding traffic. There is no scanning or probing — an
//! unregistered pair simply stays raw.

pub mod action;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod system;

pub use action::Action;
pub use envelope::{ActionData, ActionPayload};
pub use error::ActionError;
pub use registry::{ActionRegistry, PayloadCtor};
pub use system::{register_system_actions, NewAccount, SetAbi, SetCode, Transfer};
