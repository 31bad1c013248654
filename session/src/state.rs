//! Session state types.

use crate::claims::TokenClaims;
use serde::{Deserialize, Serialize};

/// The client's current belief about who is logged in and until when.
///
/// Existence of a `Session` implies the stored token was syntactically
/// well-formed (three non-empty segments); a token failing that check is
/// treated as absent and never materializes as a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The raw bearer token as stored.
    pub token: String,

    /// Claims decoded from the token payload (advisory only).
    pub claims: TokenClaims,

    /// Whether the token was well-formed and unexpired at read time.
    ///
    /// Snapshot value; re-derive through
    /// [`SessionPolicy`](crate::policy::SessionPolicy) when freshness
    /// matters.
    pub is_authenticated: bool,
}

/// Redundant persisted copy of the user identity.
///
/// Lets pages build per-user resource paths synchronously without
/// re-decoding the token. Serialized as JSON under the identity storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredIdentity {
    /// Backend-issued user identifier.
    pub id: String,

    /// Email address, when known.
    pub email: Option<String>,
}

impl StoredIdentity {
    /// Create a stored identity.
    #[must_use]
    pub const fn new(id: String, email: Option<String>) -> Self {
        Self { id, email }
    }
}
