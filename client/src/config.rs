//! Client configuration.

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the API is served under (e.g. `https://api.example.com/api`).
    /// Request paths are appended verbatim.
    pub base_url: String,

    /// Path of the login screen the navigator is pointed at on forced
    /// logout.
    ///
    /// Default: `/login`
    pub login_path: String,
}

impl ClientConfig {
    /// Create a configuration for the given API base URL.
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            login_path: "/login".to_string(),
        }
    }

    /// Set the login screen path.
    #[must_use]
    pub fn with_login_path(mut self, path: String) -> Self {
        self.login_path = path;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000/api".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("https://api.example.com".to_string())
            .with_login_path("/signin".to_string());

        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.login_path, "/signin");
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.login_path, "/login");
    }
}
