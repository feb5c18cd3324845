//! Error types for the action layer.

use chainwire_codec::CodecError;

/// Errors that can occur while resolving or re-encoding an action
/// payload.
///
/// Note what is *not* here: an unregistered (account, action) pair
/// during resolution. That is a normal outcome — the envelope simply
/// stays raw — not an error.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// The payload bytes could not be decoded into the target type.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The payload's JSON form could not be converted to or from the
    /// target type.
    #[error("json payload error: {0}")]
    Json(#[source] serde_json::Error),
}
