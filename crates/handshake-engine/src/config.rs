//! Backend configuration.

use crate::{AuthError, AuthResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default backend base URL (can be overridden at compile time via the
/// THIN_BACKEND_URL env var).
pub const DEFAULT_BACKEND_URL: &str = match option_env!("THIN_BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

/// Connection settings for the remote auth backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend; all endpoint paths resolve against it.
    #[serde(default = "default_backend_url")]
    pub base_url: String,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl BackendConfig {
    /// Create a config pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Create a config from defaults, honoring a runtime THIN_BACKEND_URL
    /// override.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("THIN_BACKEND_URL") {
            if !base_url.trim().is_empty() {
                config.base_url = base_url;
            }
        }
        config
    }

    /// Build the full URL string for a backend endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Build the full URL for a backend endpoint path, parsed.
    pub fn endpoint_url(&self, path: &str) -> AuthResult<Url> {
        Url::parse(&self.endpoint(path)).map_err(AuthError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_paths() {
        let config = BackendConfig::new("https://backend.example.com");
        assert_eq!(
            config.endpoint("/JWT"),
            "https://backend.example.com/JWT"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let config = BackendConfig::new("https://backend.example.com/");
        assert_eq!(
            config.endpoint("/NewSession"),
            "https://backend.example.com/NewSession"
        );
    }

    #[test]
    fn endpoint_url_rejects_garbage() {
        let config = BackendConfig::new("not a url");
        assert!(config.endpoint_url("/JWT").is_err());
    }

    #[test]
    fn default_config_uses_compiled_url() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, DEFAULT_BACKEND_URL);
    }
}
