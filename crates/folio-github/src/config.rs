//! Client configuration

/// Configuration for the GitHub API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    /// REST API base (default: `https://api.github.com`)
    pub api_base: String,
    /// Account whose public repositories are listed
    pub username: String,
    /// Repositories requested per listing (default: 6)
    pub limit: u32,
    /// Request timeout in seconds (default: 15)
    pub timeout_secs: u64,
    /// `User-Agent` header; GitHub rejects requests without one
    pub user_agent: String,
    /// Fetch the per-repository language breakdown (default: true)
    pub fetch_languages: bool,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            username: "Ezequiel-Caviglione".to_string(),
            limit: 6,
            timeout_secs: 15,
            user_agent: concat!("folio/", env!("CARGO_PKG_VERSION")).to_string(),
            fetch_languages: true,
        }
    }
}

impl GitHubConfig {
    /// Configuration listing `username`'s repositories
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the number of repositories requested
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Enable or disable the language breakdown requests
    pub fn with_languages(mut self, fetch_languages: bool) -> Self {
        self.fetch_languages = fetch_languages;
        self
    }
}
