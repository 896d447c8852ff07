use std::env;
use std::time::Duration;

/// Largest page size the GitHub repository listing accepts
pub const MAX_PAGE_SIZE: usize = 100;

/// GitHub data source configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Base URL of the REST API (overridable for tests and GitHub Enterprise)
    pub api_base_url: String,

    /// Upper bound for a single request, profile lookup included (default: 10s)
    pub request_timeout: Duration,

    /// Repositories per page of the paginated listing (default: 6)
    pub page_size: usize,

    /// Repositories fetched in one go for the language breakdown (default: 100)
    pub language_sample_size: usize,

    /// User agent sent with every request
    pub user_agent: String,
}

impl GitHubConfig {
    /// Create a new GitHubConfig from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("GITHUB_API_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            request_timeout: env::var("GITHUB_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            page_size: env::var("REPO_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.page_size),
            language_sample_size: env::var("LANGUAGE_SAMPLE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.language_sample_size),
            user_agent: defaults.user_agent,
        }
    }

    /// Get the base API URL without a trailing slash
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// Config pointing at a different API host, used by tests and mirrors
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            request_timeout: Duration::from_secs(10),
            page_size: 6,
            language_sample_size: MAX_PAGE_SIZE,
            user_agent: format!("ghprofile/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_profile_view() {
        let config = GitHubConfig::default();
        assert_eq!(config.page_size, 6);
        assert_eq!(config.language_sample_size, 100);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_api_base_url_trims_trailing_slash() {
        let config = GitHubConfig::with_base_url("http://127.0.0.1:1234/");
        assert_eq!(config.api_base_url(), "http://127.0.0.1:1234");
    }
}
