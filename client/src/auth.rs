//! Authentication service.
//!
//! Login, registration, and logout against the backend's `/auth` endpoints,
//! plus synchronous session introspection for pages (current user,
//! authentication status, expiry countdown).

use crate::client::ApiClient;
use crate::error::Result;
use crate::navigator::Navigator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdeck_session::channel::StorageChannel;
use taskdeck_session::state::StoredIdentity;

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account password.
    pub password: String,
}

/// Public user record returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPublic {
    /// Backend-issued user identifier.
    pub id: String,
    /// Account email.
    pub email: String,
    /// Display name, when set.
    #[serde(default)]
    pub name: Option<String>,
    /// Account creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Response of the login and register endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    /// Bearer token to present on subsequent requests.
    pub token: String,
    /// The authenticated user.
    pub user: UserPublic,
}

/// The current user as derived from stored claims, without a network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// User identifier claim, when the token carries one.
    pub user_id: Option<String>,
    /// Email claim, when the token carries one.
    pub email: Option<String>,
    /// Whether the stored token was unexpired at read time.
    pub is_authenticated: bool,
}

impl<C, L, N> ApiClient<C, L, N>
where
    C: StorageChannel,
    L: StorageChannel,
    N: Navigator,
{
    /// Authenticate and persist the returned session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RequestFailed`](crate::error::ClientError::RequestFailed)
    /// with the server's message on rejected credentials, or
    /// [`ClientError::NetworkError`](crate::error::ClientError::NetworkError)
    /// when the endpoint is unreachable. A 401 here never forces a logout;
    /// there is no session to destroy yet.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let response: AuthResponse = self.post_public("/auth/login", request).await?;
        tracing::info!(user_id = %response.user.id, "logged in");
        self.persist_session(&response);
        Ok(response)
    }

    /// Create an account and persist the returned session.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`login`](Self::login); a duplicate email
    /// surfaces as `RequestFailed` with the server's conflict message.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let response: AuthResponse = self.post_public("/auth/register", request).await?;
        tracing::info!(user_id = %response.user.id, "registered");
        self.persist_session(&response);
        Ok(response)
    }

    /// End the session.
    ///
    /// The server-side logout is best-effort: any failure is ignored, and
    /// both storage channels are cleared unconditionally afterwards.
    pub async fn logout(&self) {
        if let Some(token) = self.store().read_token() {
            self.post_best_effort("/auth/logout", Some(token.as_str()))
                .await;
        }
        self.store().clear();
        tracing::info!("logged out");
    }

    /// The current user, derived from stored claims. `None` when no usable
    /// session is stored.
    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUser> {
        let session = self.store().read()?;
        Some(CurrentUser {
            user_id: session.claims.subject.clone(),
            email: session.claims.email.clone(),
            is_authenticated: session.is_authenticated,
        })
    }

    /// Whether a stored session exists and is unexpired.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.policy().is_authenticated(self.store().read().as_ref())
    }

    /// Whether the stored session is inside the expiry warn window.
    #[must_use]
    pub fn is_expiring_soon(&self) -> bool {
        self.policy().is_expiring_soon(self.store().read().as_ref())
    }

    /// Seconds until the stored session expires, clamped at zero.
    #[must_use]
    pub fn remaining_seconds(&self) -> i64 {
        self.policy().remaining_seconds(self.store().read().as_ref())
    }

    fn persist_session(&self, response: &AuthResponse) {
        let identity = StoredIdentity::new(
            response.user.id.clone(),
            Some(response.user.email.clone()),
        );
        if let Err(error) = self.store().write(&response.token, &identity) {
            // The in-memory response is still returned to the caller; only
            // rehydration after a restart is degraded.
            tracing::warn!(error = %error, "failed to persist session after authentication");
        }
    }
}
