use super::format::{format_count, format_date, format_relative};
use super::{present, DateStyle, RenderOptions};
use crate::github::RepositorySummary;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryCard {
    pub name: String,
    pub url: String,
    pub description: String,
    pub language: Option<String>,
    pub stars: String,
    pub forks: String,
    pub is_fork: bool,
    pub updated: String,
}

pub fn render_repository(
    repo: &RepositorySummary,
    options: &RenderOptions,
    now: DateTime<Utc>,
) -> RepositoryCard {
    let updated = match options.date_style {
        DateStyle::Absolute => format_date(repo.updated_at),
        DateStyle::Relative => format_relative(repo.updated_at, now),
    };

    RepositoryCard {
        name: repo.name.clone(),
        url: repo.html_url.clone(),
        description: present(repo.description.as_deref())
            .unwrap_or(NO_DESCRIPTION)
            .to_string(),
        language: repo.declared_language().map(str::to_string),
        stars: format_count(repo.stargazers_count),
        forks: format_count(repo.forks_count),
        is_fork: repo.fork,
        updated,
    }
}
