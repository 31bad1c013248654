//! Session constants.
//!
//! Storage key names and user-facing forced-logout reasons shared across the
//! session and client layers.

/// Default storage keys used by both persistence channels.
pub mod storage_keys {
    /// Key under which the raw bearer token is stored.
    pub const TOKEN: &str = "authToken";

    /// Key under which the serialized identity object is stored.
    pub const IDENTITY: &str = "userData";
}

/// User-facing reasons attached to forced logouts.
pub mod logout_reasons {
    /// The backing API answered 401; the server is the authority on expiry.
    pub const AUTH_EXPIRED: &str = "Authentication expired. Please log in again.";

    /// A user-scoped resource answered 404; the account may have been
    /// deleted or invalidated.
    pub const ACCOUNT_NOT_FOUND: &str = "User account not found. Please log in again.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_constants() {
        assert_eq!(storage_keys::TOKEN, "authToken");
        assert_eq!(storage_keys::IDENTITY, "userData");
    }
}
