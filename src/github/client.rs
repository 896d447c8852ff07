use crate::github::{
    config::{GitHubConfig, MAX_PAGE_SIZE},
    models::{Profile, RepositorySummary},
    rate_limit::{RateLimitStatus, RateLimitTracker},
};
use crate::{Error, Result};
use reqwest::{header, Client, StatusCode};
use tracing::{debug, error};

/// Read-only GitHub REST client.
///
/// Requests are unauthenticated and never retried; the first failure is
/// returned to the caller.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
    rate_limit: RateLimitTracker,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            rate_limit: RateLimitTracker::new(),
        })
    }

    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    /// Make a GET request to GitHub API
    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.config.api_base_url(), path);
        debug!("GitHub API request: GET {}", url);

        let response = self.client.get(&url).send().await?;

        self.rate_limit
            .update_from_headers(response.headers())
            .await;

        let status = response.status();

        if !status.is_success() {
            let exhausted =
                RateLimitStatus::from_headers(response.headers()).is_some_and(|q| q.is_exhausted());
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            error!("GitHub API error: {} - {}", status, error_body);

            return Err(match status {
                StatusCode::NOT_FOUND => Error::NotFound(path.to_string()),
                StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                    if exhausted =>
                {
                    Error::Api {
                        status: status.as_u16(),
                        message: "API rate limit exceeded".to_string(),
                    }
                }
                _ => Error::Api {
                    status: status.as_u16(),
                    message: api_message(&error_body)
                        .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string()),
                },
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::Decode(format!("Failed to parse GitHub API response: {e}"))
            }
        })
    }

    /// Look up a user profile by login
    pub async fn fetch_user(&self, username: &str) -> Result<Profile> {
        let path = format!("/users/{}", urlencoding::encode(username));
        self.get(&path).await.map_err(|e| match e {
            Error::NotFound(_) => Error::NotFound(format!("GitHub user '{username}'")),
            other => other,
        })
    }

    /// One page of a user's repositories, most recently updated first
    pub async fn fetch_repository_page(
        &self,
        username: &str,
        page: u32,
        per_page: usize,
    ) -> Result<Vec<RepositorySummary>> {
        let path = format!(
            "/users/{}/repos?per_page={}&page={}&sort=updated",
            urlencoding::encode(username),
            per_page.clamp(1, MAX_PAGE_SIZE),
            page.max(1)
        );
        self.get(&path).await
    }

    /// A single bulk page of repositories used for the language breakdown
    pub async fn fetch_language_sample(
        &self,
        username: &str,
        size: usize,
    ) -> Result<Vec<RepositorySummary>> {
        let path = format!(
            "/users/{}/repos?per_page={}",
            urlencoding::encode(username),
            size.clamp(1, MAX_PAGE_SIZE)
        );
        self.get(&path).await
    }

    /// Get the quota reported by the last response
    pub async fn rate_limit_status(&self) -> Option<RateLimitStatus> {
        self.rate_limit.status().await
    }
}

/// Pull the `message` field out of a GitHub error body
fn api_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
