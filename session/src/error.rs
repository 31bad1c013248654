//! Error types for token decoding and session storage.

use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors produced by the session layer.
///
/// Decode failures encountered while *reading* stored state are absorbed by
/// [`SessionStore`](crate::store::SessionStore) and degrade to "no session";
/// they only surface as values of this type when a caller decodes a token
/// directly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Token is not three non-empty dot-separated segments, or its payload
    /// segment is not base64url-encoded JSON.
    #[error("malformed token: {reason}")]
    MalformedToken {
        /// What failed while splitting or decoding the token.
        reason: String,
    },

    /// A storage channel rejected a write.
    #[error("storage channel `{channel}` write failed: {reason}")]
    ChannelWrite {
        /// Name of the channel that failed.
        channel: &'static str,
        /// Underlying failure description.
        reason: String,
    },

    /// The identity payload could not be encoded as JSON before writing.
    #[error("identity payload could not be encoded: {0}")]
    IdentityEncode(String),
}

impl SessionError {
    /// Returns `true` if this error means the token itself is unusable.
    #[must_use]
    pub const fn is_malformed_token(&self) -> bool {
        matches!(self, Self::MalformedToken { .. })
    }

    /// Returns `true` if this error came from a storage channel rather than
    /// from the data being stored.
    #[must_use]
    pub const fn is_storage_failure(&self) -> bool {
        matches!(self, Self::ChannelWrite { .. })
    }
}
