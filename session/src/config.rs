//! Session configuration.
//!
//! Configuration values should be provided by the embedding application,
//! not hardcoded at call sites.

use crate::constants::storage_keys;

/// Configuration for session storage and expiry warnings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Storage key for the raw bearer token.
    ///
    /// Default: `authToken`
    pub token_key: String,

    /// Storage key for the serialized identity object.
    ///
    /// Default: `userData`
    pub identity_key: String,

    /// How close to expiry (in seconds) a session counts as "expiring soon".
    ///
    /// Default: 300 seconds
    pub warn_window_seconds: i64,
}

impl SessionConfig {
    /// Create a configuration with the default keys and warn window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token storage key.
    #[must_use]
    pub fn with_token_key(mut self, key: String) -> Self {
        self.token_key = key;
        self
    }

    /// Set the identity storage key.
    #[must_use]
    pub fn with_identity_key(mut self, key: String) -> Self {
        self.identity_key = key;
        self
    }

    /// Set the expiring-soon warning window.
    #[must_use]
    pub const fn with_warn_window(mut self, seconds: i64) -> Self {
        self.warn_window_seconds = seconds;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: storage_keys::TOKEN.to_string(),
            identity_key: storage_keys::IDENTITY.to_string(),
            warn_window_seconds: 300,
        }
    }
}
