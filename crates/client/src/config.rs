//! Configuration types for the backend client.

use std::time::Duration;
use url::Url;

/// Default address of the json-server backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the backend client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend store.
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_new() {
        let url = Url::parse("http://localhost:3001").unwrap();
        let config = ClientConfig::new(url.clone());

        assert_eq!(config.base_url, url);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_default_base_url_parses() {
        assert!(Url::parse(DEFAULT_BASE_URL).is_ok());
    }
}
