//! Authorized request client.
//!
//! Wraps outbound HTTP calls in the session gate: read the stored session,
//! validate the identity used for path construction, attach the bearer
//! credential, and apply the session policy's reaction to the response.
//! Exactly one attempt per call: no retries, no backoff, no client-side
//! timeout beyond the HTTP stack default.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::navigator::Navigator;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use taskdeck_session::channel::StorageChannel;
use taskdeck_session::policy::{ResponseDirective, SessionPolicy, server_message};
use taskdeck_session::store::SessionStore;

/// API client with session-aware request authorization.
///
/// Constructed explicitly by the application at startup and handed to each
/// page; there is no hidden global instance. Dropping the client is the
/// teardown; it holds no background state.
#[derive(Clone)]
pub struct ApiClient<C, L, N>
where
    C: StorageChannel,
    L: StorageChannel,
    N: Navigator,
{
    http: reqwest::Client,
    config: ClientConfig,
    store: SessionStore<C, L>,
    policy: SessionPolicy,
    navigator: N,
}

impl<C, L, N> ApiClient<C, L, N>
where
    C: StorageChannel,
    L: StorageChannel,
    N: Navigator,
{
    /// Create a client over a session store, policy, and navigator.
    #[must_use]
    pub fn new(
        config: ClientConfig,
        store: SessionStore<C, L>,
        policy: SessionPolicy,
        navigator: N,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            store,
            policy,
            navigator,
        }
    }

    /// The session store this client reads and mutates.
    #[must_use]
    pub const fn store(&self) -> &SessionStore<C, L> {
        &self.store
    }

    /// The policy this client applies to responses.
    #[must_use]
    pub const fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Session gate: the stored token, or `NotAuthenticated` without any
    /// network traffic.
    fn authorized_token(&self) -> Result<String> {
        let session = self.store.read().ok_or(ClientError::NotAuthenticated)?;

        if self.policy.is_expiring_soon(Some(&session)) {
            tracing::warn!(
                remaining_seconds = self.policy.remaining_seconds(Some(&session)),
                "issuing request on a session close to expiry"
            );
        }

        Ok(session.token)
    }

    /// Identity gate: the stored user id, validated for use in a request
    /// path. A corrupted identity must not become a malformed URL.
    fn guarded_user_id(&self) -> Result<String> {
        let identity = self
            .store
            .read_identity()
            .ok_or(ClientError::NotAuthenticated)?;

        if !is_valid_user_id(&identity.id) {
            tracing::warn!("stored user id failed format validation");
            return Err(ClientError::InvalidIdentity);
        }

        Ok(identity.id)
    }

    /// Issue a request against a path scoped under the stored user id.
    pub(crate) async fn user_fetch<T>(&self, method: Method, suffix: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let token = self.authorized_token()?;
        let user_id = self.guarded_user_id()?;
        let path = format!("/{user_id}{suffix}");
        self.send_authorized::<(), T>(method, &path, None, &token)
            .await
    }

    /// Like [`user_fetch`](Self::user_fetch), with a JSON request body.
    pub(crate) async fn user_send<B, T>(&self, method: Method, suffix: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.authorized_token()?;
        let user_id = self.guarded_user_id()?;
        let path = format!("/{user_id}{suffix}");
        self.send_authorized(method, &path, Some(body), &token)
            .await
    }

    async fn send_authorized<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: &str,
    ) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let mut request = self
            .http
            .request(method, &url)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;
        let body: Option<Value> = if text.is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };

        match self.policy.classify_response(status, body.as_ref(), true) {
            ResponseDirective::ForceLogout(reason) => {
                tracing::warn!(status, url = %url, reason = %reason, "forcing logout");
                self.store.clear();
                self.navigator.navigate_to_login(&self.config.login_path);
                Err(ClientError::SessionExpired { reason })
            }
            ResponseDirective::Surface(message) => Err(ClientError::RequestFailed(message)),
            ResponseDirective::Proceed => serde_json::from_value(body.unwrap_or(Value::Null))
                .map_err(|e| ClientError::ResponseParseFailed(e.to_string())),
        }
    }

    /// POST to an unauthenticated endpoint (login, register).
    ///
    /// Failures only surface; a 401 here means bad credentials, not an
    /// expired session, so the policy's forced-logout reaction does not
    /// apply.
    pub(crate) async fn post_public<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;
        let body: Option<Value> = if text.is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };

        if (200..300).contains(&status) {
            serde_json::from_value(body.unwrap_or(Value::Null))
                .map_err(|e| ClientError::ResponseParseFailed(e.to_string()))
        } else {
            Err(ClientError::RequestFailed(
                body.as_ref()
                    .and_then(server_message)
                    .unwrap_or_else(|| format!("request failed with status {status}")),
            ))
        }
    }

    /// POST where neither the response nor a failure matters (logout).
    pub(crate) async fn post_best_effort(&self, path: &str, token: Option<&str>) {
        let mut request = self.http.post(self.endpoint(path));
        if let Some(token) = token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Err(error) = request.send().await {
            tracing::debug!(path, error = %error, "best-effort request failed; ignoring");
        }
    }
}

/// Whether `id` is usable in a request path: at least ten characters, all
/// of them word characters or hyphens.
#[must_use]
pub fn is_valid_user_id(id: &str) -> bool {
    id.len() >= 10
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_uuid_like_ids() {
        assert!(is_valid_user_id("user-123456789"));
        assert!(is_valid_user_id("550e8400-e29b-41d4-a716-446655440000"));
        assert!(is_valid_user_id("abc_def_ghi"));
    }

    #[test]
    fn rejects_short_ids() {
        assert!(!is_valid_user_id(""));
        assert!(!is_valid_user_id("ab"));
        assert!(!is_valid_user_id("123456789"));
    }

    #[test]
    fn rejects_path_breaking_characters() {
        assert!(!is_valid_user_id("user/123456789"));
        assert!(!is_valid_user_id("user.123456789"));
        assert!(!is_valid_user_id("user 123456789"));
        assert!(!is_valid_user_id("user%123456789"));
        assert!(!is_valid_user_id("../../../../etc/passwd"));
    }
}
