//! Test token builder.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

/// Build a three-segment token carrying `payload` as its claims.
///
/// The signature segment is filler; nothing in this workspace verifies
/// signatures.
#[must_use]
pub fn fake_token(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    let signature = URL_SAFE_NO_PAD.encode("test-signature");
    format!("{header}.{body}.{signature}")
}
