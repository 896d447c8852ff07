use crate::github::{Profile, RepositorySummary};
use crate::render::{render_profile, render_repository, ProfileView, RenderOptions, RepositoryCard};
use crate::session::languages::LanguageBreakdown;
use crate::session::paginator::{PageRequest, Paginator, PaginatorState};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

pub const NO_REPOSITORIES: &str = "No repositories found";
pub const REPOSITORIES_FAILED: &str = "Failed to load repositories";
pub const MORE_REPOSITORIES_FAILED: &str = "Failed to load more repositories";

/// Identifies the search session an async request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SessionTicket(Uuid);

impl SessionTicket {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Error { message: String, not_found: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionStatus {
    Loading,
    Ready,
    Empty,
    Failed,
}

/// The repository list region of a rendered session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRegion {
    pub status: RegionStatus,
    pub cards: Vec<RepositoryCard>,
    pub summary: String,
    pub can_load_more: bool,
    pub message: Option<String>,
}

/// Serializable picture of everything the view shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub username: Option<String>,
    pub phase: Phase,
    pub profile: Option<ProfileView>,
    pub repositories: Option<RepositoryRegion>,
    pub languages: Option<LanguageBreakdown>,
}

/// Mutable state of the active search session.
///
/// Every mutation that carries async results takes the ticket of the
/// session that issued the request and is ignored when that session is no
/// longer the active one.
#[derive(Debug, Clone)]
pub struct SessionState {
    ticket: Option<SessionTicket>,
    username: Option<String>,
    phase: Phase,
    profile: Option<Profile>,
    paginator: Paginator,
    languages: Option<LanguageBreakdown>,
}

impl SessionState {
    pub fn new(page_size: usize) -> Self {
        Self {
            ticket: None,
            username: None,
            phase: Phase::Idle,
            profile: None,
            paginator: Paginator::new(page_size),
            languages: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn languages(&self) -> Option<&LanguageBreakdown> {
        self.languages.as_ref()
    }

    pub fn is_current(&self, ticket: SessionTicket) -> bool {
        self.ticket == Some(ticket)
    }

    /// Start a new session, dropping everything from the previous one
    pub fn begin(&mut self, username: &str) -> (SessionTicket, PageRequest) {
        let ticket = SessionTicket::new();
        self.ticket = Some(ticket);
        self.username = Some(username.to_string());
        self.phase = Phase::Loading;
        self.profile = None;
        self.languages = None;
        let first_page = self.paginator.start();
        (ticket, first_page)
    }

    /// Store the fetched profile; false when the session is stale
    pub fn apply_profile(&mut self, ticket: SessionTicket, profile: Profile) -> bool {
        if !self.accepts(ticket, "profile") {
            return false;
        }
        self.paginator.set_total(profile.public_repos);
        self.profile = Some(profile);
        true
    }

    /// Switch to the error state after a failed profile lookup
    pub fn fail_search(&mut self, ticket: SessionTicket, error: &Error) -> bool {
        if !self.accepts(ticket, "profile error") {
            return false;
        }
        self.phase = Phase::Error {
            message: error.user_message(),
            not_found: error.is_not_found(),
        };
        self.profile = None;
        self.languages = None;
        self.paginator = Paginator::new(self.paginator.page_size());
        true
    }

    /// Apply a repository page result, first page or later
    pub fn apply_page(
        &mut self,
        ticket: SessionTicket,
        page: Result<Vec<RepositorySummary>>,
    ) -> Result<bool> {
        if !self.accepts(ticket, "repository page") {
            return Ok(false);
        }
        match page {
            Ok(entries) => self.paginator.complete_page(entries)?,
            Err(e) => self.paginator.fail(e.user_message())?,
        }
        Ok(true)
    }

    pub fn apply_languages(&mut self, ticket: SessionTicket, breakdown: LanguageBreakdown) -> bool {
        if !self.accepts(ticket, "language breakdown") {
            return false;
        }
        self.languages = Some(breakdown);
        true
    }

    /// Mark the search complete
    pub fn finish(&mut self, ticket: SessionTicket) -> bool {
        if !self.accepts(ticket, "completion") {
            return false;
        }
        self.phase = Phase::Loaded;
        true
    }

    /// Reserve the next page for a "load more" request
    pub fn begin_load_more(&mut self) -> Option<(SessionTicket, String, PageRequest)> {
        if self.phase != Phase::Loaded {
            return None;
        }
        let ticket = self.ticket?;
        let username = self.username.clone()?;
        let request = self.paginator.request_more()?;
        Some((ticket, username, request))
    }

    pub fn snapshot(&self, options: &RenderOptions, now: DateTime<Utc>) -> SessionSnapshot {
        let visible = self.phase == Phase::Loaded;

        SessionSnapshot {
            username: self.username.clone(),
            phase: self.phase.clone(),
            profile: self
                .profile
                .as_ref()
                .filter(|_| visible)
                .map(|p| render_profile(p, options, now)),
            repositories: visible.then(|| self.repository_region(options, now)),
            languages: self.languages.clone().filter(|_| visible),
        }
    }

    fn repository_region(&self, options: &RenderOptions, now: DateTime<Utc>) -> RepositoryRegion {
        let repos = self.paginator.repositories();
        let cards: Vec<RepositoryCard> = repos
            .iter()
            .map(|r| render_repository(r, options, now))
            .collect();

        let (status, message) = match self.paginator.state() {
            PaginatorState::Idle | PaginatorState::LoadingFirstPage => (RegionStatus::Loading, None),
            PaginatorState::Failed if repos.is_empty() => {
                (RegionStatus::Failed, Some(REPOSITORIES_FAILED.to_string()))
            }
            PaginatorState::Failed => (
                RegionStatus::Ready,
                Some(MORE_REPOSITORIES_FAILED.to_string()),
            ),
            _ if repos.is_empty() => (RegionStatus::Empty, Some(NO_REPOSITORIES.to_string())),
            _ => (RegionStatus::Ready, None),
        };

        RepositoryRegion {
            status,
            cards,
            summary: self.paginator.summary(),
            can_load_more: self.paginator.can_load_more(),
            message,
        }
    }

    fn accepts(&self, ticket: SessionTicket, what: &str) -> bool {
        let current = self.is_current(ticket);
        if !current {
            debug!("Discarding stale {} from an abandoned session", what);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn profile(login: &str, public_repos: u64) -> Profile {
        Profile {
            login: login.to_string(),
            name: None,
            bio: None,
            location: None,
            company: None,
            blog: None,
            twitter_username: None,
            created_at: Utc.with_ymd_and_hms(2015, 3, 1, 0, 0, 0).unwrap(),
            followers: 0,
            following: 0,
            public_repos,
            avatar_url: None,
            html_url: format!("https://github.com/{login}"),
        }
    }

    fn repos(owner: &str, n: usize) -> Vec<RepositorySummary> {
        (0..n)
            .map(|i| RepositorySummary {
                name: format!("{owner}-{i}"),
                description: None,
                language: Some("Rust".to_string()),
                stargazers_count: 0,
                forks_count: 0,
                fork: false,
                updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                html_url: format!("https://github.com/{owner}/{owner}-{i}"),
            })
            .collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_stale_results_are_discarded() {
        let mut state = SessionState::new(6);
        let (old, _) = state.begin("alice");
        assert!(state.apply_profile(old, profile("alice", 3)));

        let (new, _) = state.begin("bob");
        assert!(state.apply_profile(new, profile("bob", 2)));

        assert!(!state.apply_page(old, Ok(repos("alice", 3))).unwrap());
        assert!(!state.apply_languages(old, LanguageBreakdown::NoData));
        assert!(!state.finish(old));
        assert!(!state.fail_search(old, &Error::Timeout));

        assert!(state.apply_page(new, Ok(repos("bob", 2))).unwrap());
        assert!(state.finish(new));

        let snapshot = state.snapshot(&RenderOptions::default(), now());
        assert_eq!(snapshot.username.as_deref(), Some("bob"));
        let region = snapshot.repositories.unwrap();
        assert!(region.cards.iter().all(|c| c.name.starts_with("bob-")));
        assert!(snapshot.languages.is_none());
    }

    #[test]
    fn test_begin_discards_previous_session() {
        let mut state = SessionState::new(6);
        let (first, _) = state.begin("alice");
        state.apply_profile(first, profile("alice", 6));
        state.apply_page(first, Ok(repos("alice", 6))).unwrap();
        state.finish(first);

        let (_, request) = state.begin("bob");
        assert_eq!(request.page, 1);
        assert!(state.paginator().repositories().is_empty());
        assert!(state.profile().is_none());
        assert_eq!(state.phase(), &Phase::Loading);
    }

    #[test]
    fn test_error_hides_regions() {
        let mut state = SessionState::new(6);
        let (ticket, _) = state.begin("ghost");
        assert!(state.fail_search(ticket, &Error::NotFound("ghost".to_string())));

        let snapshot = state.snapshot(&RenderOptions::default(), now());
        assert!(matches!(
            snapshot.phase,
            Phase::Error { not_found: true, .. }
        ));
        assert!(snapshot.profile.is_none());
        assert!(snapshot.repositories.is_none());
        assert!(state.begin_load_more().is_none());
    }

    #[test]
    fn test_repository_failure_is_contained() {
        let mut state = SessionState::new(6);
        let (ticket, _) = state.begin("alice");
        state.apply_profile(ticket, profile("alice", 10));
        state.apply_page(ticket, Err(Error::Timeout)).unwrap();
        state.finish(ticket);

        let snapshot = state.snapshot(&RenderOptions::default(), now());
        assert!(snapshot.profile.is_some());
        let region = snapshot.repositories.unwrap();
        assert_eq!(region.status, RegionStatus::Failed);
        assert_eq!(region.message.as_deref(), Some(REPOSITORIES_FAILED));
        assert!(!region.can_load_more);
    }

    #[test]
    fn test_empty_repository_list() {
        let mut state = SessionState::new(6);
        let (ticket, _) = state.begin("alice");
        state.apply_profile(ticket, profile("alice", 0));
        state.apply_page(ticket, Ok(vec![])).unwrap();
        state.finish(ticket);

        let region = state
            .snapshot(&RenderOptions::default(), now())
            .repositories
            .unwrap();
        assert_eq!(region.status, RegionStatus::Empty);
        assert_eq!(region.summary, "0 of 0 repos");
    }

    #[test]
    fn test_load_more_requires_loaded_phase() {
        let mut state = SessionState::new(6);
        assert!(state.begin_load_more().is_none());

        let (ticket, _) = state.begin("alice");
        state.apply_profile(ticket, profile("alice", 20));
        state.apply_page(ticket, Ok(repos("alice", 6))).unwrap();
        assert!(state.begin_load_more().is_none());

        state.finish(ticket);
        let (more_ticket, username, request) = state.begin_load_more().unwrap();
        assert_eq!(more_ticket, ticket);
        assert_eq!(username, "alice");
        assert_eq!(request.page, 2);
        assert!(state.begin_load_more().is_none());
    }
}
