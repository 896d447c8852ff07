use crate::github::{parse_username, GitHubClient, RateLimitStatus};
use crate::render::RenderOptions;
use crate::session::languages::aggregate;
use crate::session::state::{Phase, SessionSnapshot, SessionState};
use crate::{Error, Result};
use chrono::Utc;
use futures::future;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// How the repository page and language sample are fetched after a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    #[default]
    Concurrent,
    Sequential,
}

impl FromStr for FetchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "concurrent" => Ok(FetchMode::Concurrent),
            "sequential" => Ok(FetchMode::Sequential),
            other => Err(Error::Validation(format!(
                "Invalid fetch mode: {other}. Must be concurrent or sequential"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    pub render: RenderOptions,
    pub top_languages: usize,
    pub fetch_mode: FetchMode,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            top_languages: 5,
            fetch_mode: FetchMode::Concurrent,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Completed(Box<SessionSnapshot>),
    /// A newer search started before this one finished
    Superseded,
}

#[derive(Debug, Clone)]
pub enum LoadMoreOutcome {
    /// The page was applied; failures show up in the repository region
    Loaded(Box<SessionSnapshot>),
    /// Nothing to load, or a page request is already in flight
    Unavailable,
    Superseded,
}

/// Drives one profile view: search, load more, retry.
///
/// Clones share the same session, so a search started from one handle
/// supersedes any in flight on another.
#[derive(Clone)]
pub struct ProfileController {
    client: GitHubClient,
    options: ControllerOptions,
    state: Arc<RwLock<SessionState>>,
}

impl ProfileController {
    pub fn new(client: GitHubClient, options: ControllerOptions) -> Self {
        let state = SessionState::new(client.config().page_size);
        Self {
            client,
            options,
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Look up a user and populate the session
    pub async fn search(&self, input: &str) -> Result<SearchOutcome> {
        let username = parse_username(input)?;
        let (ticket, first_page) = self.state.write().await.begin(&username);
        info!("Looking up GitHub user {}", username);

        let profile = match self.client.fetch_user(&username).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Profile lookup for {} failed: {}", username, e.log_safe());
                if !self.state.write().await.fail_search(ticket, &e) {
                    return Ok(SearchOutcome::Superseded);
                }
                return Err(e);
            }
        };

        if !self.state.write().await.apply_profile(ticket, profile) {
            return Ok(SearchOutcome::Superseded);
        }

        let sample_size = self.client.config().language_sample_size;
        let repos_fut =
            self.client
                .fetch_repository_page(&username, first_page.page, first_page.per_page);
        let languages_fut = self.client.fetch_language_sample(&username, sample_size);

        let (first_page, sample) = match self.options.fetch_mode {
            FetchMode::Concurrent => future::join(repos_fut, languages_fut).await,
            FetchMode::Sequential => {
                let first_page = repos_fut.await;
                (first_page, languages_fut.await)
            }
        };

        if let Err(e) = &first_page {
            warn!("Failed to load repositories for {}: {}", username, e.log_safe());
        }
        let breakdown = aggregate(sample, self.options.top_languages);

        let mut state = self.state.write().await;
        if !state.apply_page(ticket, first_page)? {
            return Ok(SearchOutcome::Superseded);
        }
        state.apply_languages(ticket, breakdown);
        state.finish(ticket);
        debug!("Search for {} complete", username);

        Ok(SearchOutcome::Completed(Box::new(
            state.snapshot(&self.options.render, Utc::now()),
        )))
    }

    /// Fetch and append the next repository page, if one may be requested
    pub async fn load_more(&self) -> Result<LoadMoreOutcome> {
        let Some((ticket, username, request)) = self.state.write().await.begin_load_more() else {
            return Ok(LoadMoreOutcome::Unavailable);
        };
        debug!("Loading repository page {} for {}", request.page, username);

        let page = self
            .client
            .fetch_repository_page(&username, request.page, request.per_page)
            .await;
        if let Err(e) = &page {
            warn!("Failed to load more repositories for {}: {}", username, e.log_safe());
        }

        let mut state = self.state.write().await;
        if !state.apply_page(ticket, page)? {
            return Ok(LoadMoreOutcome::Superseded);
        }
        Ok(LoadMoreOutcome::Loaded(Box::new(
            state.snapshot(&self.options.render, Utc::now()),
        )))
    }

    /// Re-run the most recent search
    pub async fn retry(&self) -> Result<SearchOutcome> {
        let username = self
            .state
            .read()
            .await
            .username()
            .map(str::to_string)
            .ok_or_else(|| Error::Validation("There is no previous search to retry".to_string()))?;
        self.search(&username).await
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state
            .read()
            .await
            .snapshot(&self.options.render, Utc::now())
    }

    pub async fn can_load_more(&self) -> bool {
        let state = self.state.read().await;
        state.phase() == &Phase::Loaded
            && state.paginator().can_load_more()
    }

    pub async fn rate_limit_status(&self) -> Option<RateLimitStatus> {
        self.client.rate_limit_status().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_mode_parse() {
        assert_eq!("Sequential".parse::<FetchMode>().unwrap(), FetchMode::Sequential);
        assert_eq!("concurrent".parse::<FetchMode>().unwrap(), FetchMode::Concurrent);
        assert!("parallel".parse::<FetchMode>().is_err());
    }

    #[tokio::test]
    async fn test_empty_input_is_validation_error() {
        let client = GitHubClient::new(crate::github::GitHubConfig::with_base_url(
            "http://127.0.0.1:9",
        ))
        .unwrap();
        let controller = ProfileController::new(client, ControllerOptions::default());

        assert!(matches!(controller.search("   ").await, Err(Error::Validation(_))));
        assert!(matches!(controller.retry().await, Err(Error::Validation(_))));
        assert!(matches!(
            controller.load_more().await,
            Ok(LoadMoreOutcome::Unavailable)
        ));
    }
}
