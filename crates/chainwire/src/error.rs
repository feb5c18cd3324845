//! Unified error type for the chainwire crates.

use chainwire_action::ActionError;
use chainwire_codec::CodecError;
use chainwire_p2p::P2pError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `chainwire` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate.
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ChainwireError {
    /// A codec-level error (truncation, bad varint, bad UTF-8).
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// An action-level error (payload decode, JSON conversion).
    #[error(transparent)]
    Action(#[from] ActionError),

    /// A framing-level error (unknown tag, incomplete read).
    #[error(transparent)]
    P2p(#[from] P2pError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_codec_error() {
        let err = CodecError::Truncated {
            needed: 4,
            available: 1,
        };
        let top: ChainwireError = err.into();
        assert!(matches!(top, ChainwireError::Codec(_)));
        assert!(top.to_string().contains("4"));
    }

    #[test]
    fn test_from_action_error() {
        let err = ActionError::Codec(CodecError::InvalidVarint(
            "unterminated",
        ));
        let top: ChainwireError = err.into();
        assert!(matches!(top, ChainwireError::Action(_)));
    }

    #[test]
    fn test_from_p2p_error() {
        let err = P2pError::UnknownMessageType(42);
        let top: ChainwireError = err.into();
        assert!(matches!(top, ChainwireError::P2p(_)));
        assert!(top.to_string().contains("42"));
    }
}
