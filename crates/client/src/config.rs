//! Client configuration

/// API location used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Configuration for the seating API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Skip system proxies, for APIs on the local machine
    pub no_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            no_proxy: false,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Bypass system proxies
    pub fn without_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }
}
