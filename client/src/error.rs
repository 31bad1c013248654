//! Error types for the authorized request client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced to pages by the request client and API services.
///
/// Malformed stored tokens never appear here: they are absorbed by the
/// session store during reads and degrade to [`ClientError::NotAuthenticated`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// No stored session; no network call was made.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The stored user id is not usable for building a request path; no
    /// network call was made.
    #[error("invalid user id format")]
    InvalidIdentity,

    /// The server rejected the session. Storage has already been cleared
    /// and the user sent to the login screen when this is returned.
    #[error("session expired: {reason}")]
    SessionExpired {
        /// User-facing reason for the forced logout.
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The request never produced a response.
    #[error("network error: {0}")]
    NetworkError(String),

    /// A success response carried a body this client could not decode.
    #[error("response parsing failed: {0}")]
    ResponseParseFailed(String),
}

impl ClientError {
    /// Returns `true` if the user has to authenticate again before
    /// retrying.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::SessionExpired { .. })
    }
}
