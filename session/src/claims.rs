//! Token payload inspection.
//!
//! Decodes the claims of a compact three-segment bearer token. Decoding is
//! *advisory*: the signature segment is never verified (a client holds no
//! verification key), so a successful decode proves nothing about
//! authenticity. Callers use the claims to pre-check expiry and to derive
//! the current user without a network round trip; the server remains the
//! authority on whether the token is accepted.

use crate::error::{Result, SessionError};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Claims decoded from a token's payload segment.
///
/// All fields are optional at the decode level; which of them are required
/// is a policy question (see [`validate_token`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenClaims {
    /// User identifier, from the `sub` claim, falling back to `user_id`.
    pub subject: Option<String>,

    /// Email address, from the `email` claim, falling back to `user_email`.
    pub email: Option<String>,

    /// Issue time in seconds since the epoch (`iat`).
    pub issued_at: Option<i64>,

    /// Expiry time in seconds since the epoch (`exp`).
    pub expires_at: Option<i64>,

    /// Issuer (`iss`).
    pub issuer: Option<String>,

    /// Audience (`aud`).
    pub audience: Option<String>,
}

impl TokenClaims {
    /// Expiry as a [`DateTime`], when the claim is present and in range.
    #[must_use]
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        self.expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Issue time as a [`DateTime`], when the claim is present and in range.
    #[must_use]
    pub fn issued_at_utc(&self) -> Option<DateTime<Utc>> {
        self.issued_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Whether the expiry claim lies in the past.
    ///
    /// A missing `exp` claim is reported as *not* expired; use
    /// [`SessionPolicy::is_authenticated`](crate::policy::SessionPolicy::is_authenticated)
    /// for the stricter "provably still valid" check.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp < now.timestamp())
    }

    /// Seconds until expiry, clamped at zero. Missing `exp` counts as zero.
    #[must_use]
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        self.expires_at
            .map_or(0, |exp| (exp - now.timestamp()).max(0))
    }
}

/// Structural validation report for a token.
///
/// Mirrors what a login guard needs to decide between "session usable",
/// "session expired", and "token garbage".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenValidation {
    /// Format is valid, token is unexpired, and required claims are present.
    pub is_valid: bool,

    /// Token splits into three non-empty segments.
    pub has_valid_format: bool,

    /// The `exp` claim lies in the past.
    pub is_expired: bool,

    /// Both a subject (`sub`/`user_id`) and an email are present.
    pub has_required_claims: bool,

    /// Human-readable description of the first failed check, if any.
    pub error: Option<String>,
}

/// Decoded summary of a token for display and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// User identifier claim.
    pub user_id: Option<String>,

    /// Email claim.
    pub email: Option<String>,

    /// Whether the expiry claim lies in the past.
    pub is_expired: bool,

    /// Seconds until expiry, clamped at zero.
    pub time_until_expiry: i64,

    /// Expiry timestamp.
    pub expires_at: Option<DateTime<Utc>>,

    /// Issue timestamp.
    pub issued_at: Option<DateTime<Utc>>,

    /// Issuer claim.
    pub issuer: Option<String>,

    /// Audience claim.
    pub audience: Option<String>,
}

/// Whether `token` splits into exactly three non-empty dot-separated
/// segments.
#[must_use]
pub fn has_valid_format(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3 && segments.iter().all(|segment| !segment.is_empty())
}

/// Decode the payload segment of a compact token into [`TokenClaims`].
///
/// No signature verification is performed; a successful decode must not be
/// treated as proof of authenticity.
///
/// # Errors
///
/// Returns [`SessionError::MalformedToken`] when the token is not three
/// non-empty segments, or when the payload segment is not base64url-encoded
/// UTF-8 JSON.
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 || segments.iter().any(|segment| segment.is_empty()) {
        return Err(SessionError::MalformedToken {
            reason: "expected three non-empty dot-separated segments".to_string(),
        });
    }

    // Tokens are minted unpadded, but tolerate padding from sloppy issuers.
    let payload_segment = segments[1].trim_end_matches('=');
    let payload_bytes = URL_SAFE_NO_PAD.decode(payload_segment).map_err(|e| {
        SessionError::MalformedToken {
            reason: format!("payload segment is not valid base64url: {e}"),
        }
    })?;

    let payload_text =
        String::from_utf8(payload_bytes).map_err(|e| SessionError::MalformedToken {
            reason: format!("payload is not valid UTF-8: {e}"),
        })?;

    let payload: Value =
        serde_json::from_str(&payload_text).map_err(|e| SessionError::MalformedToken {
            reason: format!("payload is not valid JSON: {e}"),
        })?;

    let Some(object) = payload.as_object() else {
        return Err(SessionError::MalformedToken {
            reason: "payload is not a JSON object".to_string(),
        });
    };

    let string_claim = |primary: &str, fallback: Option<&str>| -> Option<String> {
        object
            .get(primary)
            .and_then(Value::as_str)
            .or_else(|| fallback.and_then(|name| object.get(name).and_then(Value::as_str)))
            .map(ToString::to_string)
    };

    Ok(TokenClaims {
        subject: string_claim("sub", Some("user_id")),
        email: string_claim("email", Some("user_email")),
        issued_at: object.get("iat").and_then(Value::as_i64),
        expires_at: object.get("exp").and_then(Value::as_i64),
        issuer: string_claim("iss", None),
        audience: string_claim("aud", None),
    })
}

/// Validate the structure and basic properties of a token.
///
/// Never fails: every outcome is reported through the flags on
/// [`TokenValidation`].
#[must_use]
pub fn validate_token(token: &str, now: DateTime<Utc>) -> TokenValidation {
    if token.is_empty() {
        return TokenValidation {
            is_valid: false,
            has_valid_format: false,
            is_expired: true,
            has_required_claims: false,
            error: Some("token is empty".to_string()),
        };
    }

    if !has_valid_format(token) {
        return TokenValidation {
            is_valid: false,
            has_valid_format: false,
            is_expired: true,
            has_required_claims: false,
            error: Some("token does not have a valid three-segment format".to_string()),
        };
    }

    let Ok(claims) = decode_claims(token) else {
        return TokenValidation {
            is_valid: false,
            has_valid_format: true,
            is_expired: true,
            has_required_claims: false,
            error: Some("failed to decode token payload".to_string()),
        };
    };

    let is_expired = claims.is_expired(now);
    let has_required_claims = claims.subject.is_some() && claims.email.is_some();
    let is_valid = !is_expired && has_required_claims;

    let error = if is_valid {
        None
    } else if is_expired {
        Some("token is expired".to_string())
    } else {
        Some("token is missing required claims".to_string())
    };

    TokenValidation {
        is_valid,
        has_valid_format: true,
        is_expired,
        has_required_claims,
        error,
    }
}

/// Decode a token into a display-oriented [`TokenInfo`] summary.
///
/// Returns `None` when the token cannot be decoded at all.
#[must_use]
pub fn token_info(token: &str, now: DateTime<Utc>) -> Option<TokenInfo> {
    let claims = decode_claims(token).ok()?;

    Some(TokenInfo {
        user_id: claims.subject.clone(),
        email: claims.email.clone(),
        is_expired: claims.is_expired(now),
        time_until_expiry: claims.remaining_seconds(now),
        expires_at: claims.expires_at_utc(),
        issued_at: claims.issued_at_utc(),
        issuer: claims.issuer,
        audience: claims.audience,
    })
}
