//! Session policy.
//!
//! Pure decisions over the stored session: whether the client should treat
//! itself as logged in, whether expiry is imminent, and how to react to a
//! response status. The policy decides; carrying out the reaction (clearing
//! storage, navigating to the login screen) is the request client's job.

use crate::clock::Clock;
use crate::config::SessionConfig;
use crate::constants::logout_reasons;
use crate::state::Session;
use serde_json::Value;
use std::sync::Arc;

/// What to do with a response, as decided by [`SessionPolicy::classify_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseDirective {
    /// Success; hand the body to the caller.
    Proceed,

    /// Destroy the session, send the user to the login screen, and fail the
    /// call. Carries the user-facing reason.
    ForceLogout(String),

    /// Fail the call with a message for the page to render; the session
    /// stays intact.
    Surface(String),
}

/// Derives authentication status and response reactions from the stored
/// session.
#[derive(Clone)]
pub struct SessionPolicy {
    warn_window_seconds: i64,
    clock: Arc<dyn Clock>,
}

impl SessionPolicy {
    /// Create a policy from configuration and a time source.
    #[must_use]
    pub fn new(config: &SessionConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            warn_window_seconds: config.warn_window_seconds,
            clock,
        }
    }

    /// True iff a session is present and its expiry claim is strictly in
    /// the future.
    #[must_use]
    pub fn is_authenticated(&self, session: Option<&Session>) -> bool {
        let now = self.clock.now().timestamp();
        session.is_some_and(|s| s.claims.expires_at.is_some_and(|exp| exp > now))
    }

    /// True iff there is no session, or expiry is closer than the warn
    /// window.
    ///
    /// Advisory only: nothing in this layer acts on it beyond a warning, as
    /// there is no token refresh flow.
    #[must_use]
    pub fn is_expiring_soon(&self, session: Option<&Session>) -> bool {
        let now = self.clock.now().timestamp();
        session.is_none_or(|s| {
            s.claims
                .expires_at
                .is_none_or(|exp| exp - now < self.warn_window_seconds)
        })
    }

    /// Seconds until the session expires, clamped at zero.
    #[must_use]
    pub fn remaining_seconds(&self, session: Option<&Session>) -> i64 {
        let now = self.clock.now();
        session.map_or(0, |s| s.claims.remaining_seconds(now))
    }

    /// Decide how the client should react to a response.
    ///
    /// * 401 always destroys the session: the server is the authority on
    ///   token validity, regardless of what the local expiry claim says.
    /// * 404 destroys the session only for user-scoped requests (paths keyed
    ///   by the session's own user id): such a miss is indistinguishable
    ///   from a deleted or invalidated account.
    /// * Any other non-2xx surfaces the server's `message`/`detail` field,
    ///   or a generic message when the body carries neither.
    #[allow(clippy::unused_self)]
    #[must_use]
    pub fn classify_response(
        &self,
        status: u16,
        body: Option<&Value>,
        user_scoped: bool,
    ) -> ResponseDirective {
        match status {
            401 => ResponseDirective::ForceLogout(logout_reasons::AUTH_EXPIRED.to_string()),
            404 if user_scoped => {
                ResponseDirective::ForceLogout(logout_reasons::ACCOUNT_NOT_FOUND.to_string())
            }
            status if (200..300).contains(&status) => ResponseDirective::Proceed,
            status => ResponseDirective::Surface(
                body.and_then(server_message)
                    .unwrap_or_else(|| format!("request failed with status {status}")),
            ),
        }
    }
}

/// Extract the server-provided error message from a JSON body.
///
/// Looks for `message` first, then `detail` (the field FastAPI-style
/// backends use).
#[must_use]
pub fn server_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .or_else(|| body.get("detail").and_then(Value::as_str))
        .map(ToString::to_string)
}
