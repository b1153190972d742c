//! Client configuration.

/// Configuration for the API client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix prepended to every API path.
    ///
    /// Empty means same origin, which is how the page is normally served.
    pub base_url: String,
}

impl ClientConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the config baked in at compile time.
    ///
    /// `TODO_API_BASE_URL` overrides the base URL. The browser has no process
    /// environment, so the value is captured when the crate is built.
    pub fn from_env() -> Self {
        let base_url = option_env!("TODO_API_BASE_URL").unwrap_or_default();
        Self::new().base_url(base_url)
    }

    /// Set the base URL. A trailing slash is dropped.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        while url.ends_with('/') {
            url.pop();
        }
        self.base_url = url;
        self
    }

    /// Resolve an absolute API path (`/api/...`) against the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
