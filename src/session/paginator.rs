use crate::github::RepositorySummary;
use crate::{Error, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaginatorState {
    Idle,
    LoadingFirstPage,
    LoadingMore,
    Loaded,
    Exhausted,
    Failed,
}

/// Which page to fetch next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: usize,
}

/// Accumulates repository pages for one session.
///
/// Entries are only ever appended, in the order the API returned them.
/// The cursor is the 1-based page that will be requested next and only
/// moves after a page arrived.
#[derive(Debug, Clone)]
pub struct Paginator {
    state: PaginatorState,
    repositories: Vec<RepositorySummary>,
    cursor: u32,
    page_size: usize,
    total: Option<u64>,
    last_error: Option<String>,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: PaginatorState::Idle,
            repositories: Vec::new(),
            cursor: 1,
            page_size: page_size.max(1),
            total: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> PaginatorState {
        self.state
    }

    pub fn repositories(&self) -> &[RepositorySummary] {
        &self.repositories
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Begin a new session from scratch
    pub fn start(&mut self) -> PageRequest {
        self.repositories.clear();
        self.cursor = 1;
        self.total = None;
        self.last_error = None;
        self.state = PaginatorState::LoadingFirstPage;
        self.page_request()
    }

    /// Known repository count from the profile, used to stop early on an
    /// exactly full last page
    pub fn set_total(&mut self, total: u64) {
        self.total = Some(total);
    }

    /// Whether the "load more" affordance should be offered
    pub fn can_load_more(&self) -> bool {
        match self.state {
            PaginatorState::Loaded => true,
            PaginatorState::Failed => self.cursor > 1,
            _ => false,
        }
    }

    /// Ask for the next page; `None` when no request is allowed right now
    pub fn request_more(&mut self) -> Option<PageRequest> {
        if !self.can_load_more() {
            return None;
        }
        self.last_error = None;
        self.state = PaginatorState::LoadingMore;
        Some(self.page_request())
    }

    /// Append a fetched page
    pub fn complete_page(&mut self, entries: Vec<RepositorySummary>) -> Result<()> {
        self.ensure_loading("complete a page")?;

        let short = entries.len() < self.page_size;
        self.repositories.extend(entries);
        self.cursor += 1;

        let reached_total = self
            .total
            .is_some_and(|total| self.repositories.len() as u64 >= total);

        self.state = if short || reached_total {
            PaginatorState::Exhausted
        } else {
            PaginatorState::Loaded
        };
        Ok(())
    }

    /// Record a failed page fetch; accumulated entries stay
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<()> {
        self.ensure_loading("fail a page")?;
        self.last_error = Some(reason.into());
        self.state = PaginatorState::Failed;
        Ok(())
    }

    /// "6+ of 12 repos" while more may exist, "12 of 12 repos" once done
    pub fn summary(&self) -> String {
        let loaded = self.repositories.len();
        let total = self.total.unwrap_or(loaded as u64);
        if self.state == PaginatorState::Exhausted {
            format!("{loaded} of {total} repos")
        } else {
            format!("{loaded}+ of {total} repos")
        }
    }

    fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.cursor,
            per_page: self.page_size,
        }
    }

    fn ensure_loading(&self, action: &str) -> Result<()> {
        match self.state {
            PaginatorState::LoadingFirstPage | PaginatorState::LoadingMore => Ok(()),
            other => Err(Error::Internal(format!(
                "Cannot {action} while paginator is {other:?}"
            ))),
        }
    }
}
