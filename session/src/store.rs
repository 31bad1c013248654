//! Dual-channel session store.
//!
//! The session is persisted redundantly through two channels (a
//! cookie-role channel and a local-store-role channel) so that either one
//! being cleared independently does not lose the session. The store is the
//! single authoritative owner of the pair: every write and every clear goes
//! through both channels, and reads prefer the cookie channel with the
//! local channel as fallback.

use crate::channel::StorageChannel;
use crate::claims::decode_claims;
use crate::clock::Clock;
use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::state::{Session, StoredIdentity};
use std::sync::Arc;

/// Persists and rehydrates the current session across application runs.
#[derive(Clone)]
pub struct SessionStore<C, L>
where
    C: StorageChannel,
    L: StorageChannel,
{
    cookie: C,
    local: L,
    config: SessionConfig,
    clock: Arc<dyn Clock>,
}

impl<C, L> SessionStore<C, L>
where
    C: StorageChannel,
    L: StorageChannel,
{
    /// Create a store over a cookie-role channel and a local-store-role
    /// channel.
    #[must_use]
    pub fn new(cookie: C, local: L, config: SessionConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            cookie,
            local,
            config,
            clock,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Persist `token` and `identity` to both channels.
    ///
    /// A failing channel does not stop the other from being attempted; both
    /// writes always run, and the first failure (if any) is returned after
    /// the fact.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IdentityEncode`] when the identity cannot be
    /// serialized, or the first [`SessionError::ChannelWrite`] observed.
    pub fn write(&self, token: &str, identity: &StoredIdentity) -> Result<()> {
        let identity_json = serde_json::to_string(identity)
            .map_err(|e| SessionError::IdentityEncode(e.to_string()))?;

        let mut first_error = None;
        let writes: [(&dyn StorageChannel, &str, &str); 4] = [
            (&self.cookie, self.config.token_key.as_str(), token),
            (&self.cookie, self.config.identity_key.as_str(), &identity_json),
            (&self.local, self.config.token_key.as_str(), token),
            (&self.local, self.config.identity_key.as_str(), &identity_json),
        ];

        for (channel, key, value) in writes {
            if let Err(error) = channel.set(key, value) {
                tracing::warn!(
                    channel = channel.name(),
                    key,
                    error = %error,
                    "session write failed on channel"
                );
                first_error.get_or_insert(error);
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Read the current session, if one is stored.
    ///
    /// The cookie channel is preferred; the local channel is the fallback.
    /// A stored token that is not three non-empty segments (or whose payload
    /// does not decode) is treated as absent; the failure is logged, never
    /// propagated.
    #[must_use]
    pub fn read(&self) -> Option<Session> {
        let token = self.read_token()?;

        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(error) => {
                tracing::debug!(error = %error, "stored token is malformed; treating as absent");
                return None;
            }
        };

        let now = self.clock.now().timestamp();
        let is_authenticated = claims.expires_at.is_some_and(|exp| exp > now);

        Some(Session {
            token,
            claims,
            is_authenticated,
        })
    }

    /// Read the raw stored token without decoding it.
    #[must_use]
    pub fn read_token(&self) -> Option<String> {
        self.cookie
            .get(&self.config.token_key)
            .or_else(|| self.local.get(&self.config.token_key))
    }

    /// Read the stored identity, if present and parsable.
    ///
    /// The payload is parsed directly first; if that fails it is
    /// percent-decoded and parsed again (cookie values are often stored
    /// percent-encoded). An unparsable payload degrades to `None`.
    #[must_use]
    pub fn read_identity(&self) -> Option<StoredIdentity> {
        let raw = self
            .cookie
            .get(&self.config.identity_key)
            .or_else(|| self.local.get(&self.config.identity_key))?;

        if let Ok(identity) = serde_json::from_str::<StoredIdentity>(&raw) {
            return Some(identity);
        }

        if let Ok(decoded) = urlencoding::decode(&raw) {
            if let Ok(identity) = serde_json::from_str::<StoredIdentity>(&decoded) {
                return Some(identity);
            }
        }

        tracing::warn!("stored identity is unparsable; treating as absent");
        None
    }

    /// Remove the token and identity from both channels. Idempotent.
    pub fn clear(&self) {
        self.cookie.remove(&self.config.token_key);
        self.cookie.remove(&self.config.identity_key);
        self.local.remove(&self.config.token_key);
        self.local.remove(&self.config.identity_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::MemoryChannel;
    use crate::mocks::{FlakyChannel, fake_token, test_clock};

    fn token_with_exp(exp: i64) -> String {
        fake_token(&serde_json::json!({
            "sub": "user-123456789",
            "email": "user@example.com",
            "exp": exp,
        }))
    }

    fn store_with(
        cookie: MemoryChannel,
        local: MemoryChannel,
    ) -> SessionStore<MemoryChannel, MemoryChannel> {
        SessionStore::new(
            cookie,
            local,
            SessionConfig::default(),
            Arc::new(test_clock()),
        )
    }

    fn identity() -> StoredIdentity {
        StoredIdentity::new(
            "user-123456789".to_string(),
            Some("user@example.com".to_string()),
        )
    }

    #[test]
    fn write_then_read_round_trips_identity_exactly() {
        let store = store_with(MemoryChannel::new("cookie"), MemoryChannel::new("local"));
        let now = test_clock().now().timestamp();

        assert!(store.write(&token_with_exp(now + 3_600), &identity()).is_ok());
        assert_eq!(store.read_identity(), Some(identity()));
        // A second read with no write in between returns the same value.
        assert_eq!(store.read_identity(), Some(identity()));
    }

    #[test]
    fn write_populates_both_channels() {
        let cookie = MemoryChannel::new("cookie");
        let local = MemoryChannel::new("local");
        let store = store_with(cookie.clone(), local.clone());
        let now = test_clock().now().timestamp();

        assert!(store.write(&token_with_exp(now + 3_600), &identity()).is_ok());

        assert!(cookie.get("authToken").is_some());
        assert!(cookie.get("userData").is_some());
        assert!(local.get("authToken").is_some());
        assert!(local.get("userData").is_some());
    }

    #[test]
    fn read_falls_back_to_local_channel() {
        let cookie = MemoryChannel::new("cookie");
        let local = MemoryChannel::new("local");
        let store = store_with(cookie.clone(), local.clone());
        let now = test_clock().now().timestamp();

        assert!(store.write(&token_with_exp(now + 3_600), &identity()).is_ok());
        // Simulate the cookie being cleared externally.
        cookie.remove("authToken");
        cookie.remove("userData");

        let session = store.read();
        assert!(session.is_some_and(|s| s.is_authenticated));
        assert_eq!(store.read_identity(), Some(identity()));
    }

    #[test]
    fn clear_empties_both_channels() {
        let cookie = MemoryChannel::new("cookie");
        let local = MemoryChannel::new("local");
        let store = store_with(cookie.clone(), local.clone());
        let now = test_clock().now().timestamp();

        assert!(store.write(&token_with_exp(now + 3_600), &identity()).is_ok());
        store.clear();
        store.clear(); // idempotent

        assert!(store.read().is_none());
        assert_eq!(cookie.get("authToken"), None);
        assert_eq!(cookie.get("userData"), None);
        assert_eq!(local.get("authToken"), None);
        assert_eq!(local.get("userData"), None);
    }

    #[test]
    fn malformed_stored_token_reads_as_no_session() {
        let cookie = MemoryChannel::new("cookie");
        let store = store_with(cookie.clone(), MemoryChannel::new("local"));

        assert!(cookie.set("authToken", "garbage-token").is_ok());
        assert!(store.read().is_none());
    }

    #[test]
    fn expired_stored_token_reads_as_unauthenticated_session() {
        let store = store_with(MemoryChannel::new("cookie"), MemoryChannel::new("local"));
        let now = test_clock().now().timestamp();

        assert!(store.write(&token_with_exp(now - 1), &identity()).is_ok());

        let session = store.read();
        assert!(session.is_some_and(|s| !s.is_authenticated));
    }

    #[test]
    fn percent_encoded_identity_is_parsed() {
        let cookie = MemoryChannel::new("cookie");
        let store = store_with(cookie.clone(), MemoryChannel::new("local"));

        let encoded =
            urlencoding::encode(r#"{"id":"user-123456789","email":"user@example.com"}"#)
                .into_owned();
        assert!(cookie.set("userData", &encoded).is_ok());

        assert_eq!(store.read_identity(), Some(identity()));
    }

    #[test]
    fn corrupt_identity_degrades_to_none() {
        let cookie = MemoryChannel::new("cookie");
        let store = store_with(cookie.clone(), MemoryChannel::new("local"));

        assert!(cookie.set("userData", "{not-json").is_ok());
        assert_eq!(store.read_identity(), None);
    }

    #[test]
    fn failing_cookie_channel_still_writes_local() {
        let cookie = FlakyChannel::new("cookie");
        cookie.fail_writes(true);
        let local = MemoryChannel::new("local");
        let store = SessionStore::new(
            cookie,
            local.clone(),
            SessionConfig::default(),
            Arc::new(test_clock()),
        );
        let now = test_clock().now().timestamp();

        let result = store.write(&token_with_exp(now + 3_600), &identity());

        assert!(matches!(
            result,
            Err(SessionError::ChannelWrite { channel: "cookie", .. })
        ));
        assert!(local.get("authToken").is_some());
        assert!(local.get("userData").is_some());
    }
}
