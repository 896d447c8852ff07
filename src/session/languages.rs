use crate::github::RepositorySummary;
use crate::Result;
use serde::Serialize;
use tracing::warn;

/// One chart segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub label: String,
    pub count: u64,
    /// Percentage of repositories that declare a language
    pub percentage: f64,
    /// Percentage of the whole sample, undeclared repositories included
    pub share_of_sample: f64,
}

/// Occurrence counts per language over one sample of repositories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTally {
    /// First-seen order
    counts: Vec<(String, u64)>,
    declared: u64,
    sample_size: u64,
}

impl LanguageTally {
    pub fn from_repositories(repos: &[RepositorySummary]) -> Self {
        let mut tally = Self {
            sample_size: repos.len() as u64,
            ..Self::default()
        };

        for language in repos.iter().filter_map(RepositorySummary::declared_language) {
            tally.declared += 1;
            match tally.counts.iter_mut().find(|(name, _)| name == language) {
                Some((_, count)) => *count += 1,
                None => tally.counts.push((language.to_string(), 1)),
            }
        }

        tally
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn declared(&self) -> u64 {
        self.declared
    }

    pub fn sample_size(&self) -> u64 {
        self.sample_size
    }

    pub fn count(&self, language: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, count)| *count)
    }

    /// The `n` most common languages; ties keep first-seen order
    pub fn top(&self, n: usize) -> Vec<LanguageShare> {
        let mut sorted = self.counts.clone();
        // sort_by is stable
        sorted.sort_by(|a, b| b.1.cmp(&a.1));

        sorted
            .into_iter()
            .take(n)
            .map(|(label, count)| LanguageShare {
                percentage: percent(count, self.declared),
                share_of_sample: percent(count, self.sample_size),
                label,
                count,
            })
            .collect()
    }
}

/// 100 × part / whole, one decimal place; 0.0 for an empty whole
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (1000.0 * part as f64 / whole as f64).round() / 10.0
}

/// What the language region shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "languages", rename_all = "snake_case")]
pub enum LanguageBreakdown {
    Chart(Vec<LanguageShare>),
    NoData,
}

impl LanguageBreakdown {
    pub fn shares(&self) -> &[LanguageShare] {
        match self {
            LanguageBreakdown::Chart(shares) => shares,
            LanguageBreakdown::NoData => &[],
        }
    }
}

/// Turn a language sample fetch into chart input.
///
/// A failed fetch is contained here and shows up as `NoData`.
pub fn aggregate(sample: Result<Vec<RepositorySummary>>, top_n: usize) -> LanguageBreakdown {
    match sample {
        Ok(repos) => {
            let shares = LanguageTally::from_repositories(&repos).top(top_n);
            if shares.is_empty() {
                LanguageBreakdown::NoData
            } else {
                LanguageBreakdown::Chart(shares)
            }
        }
        Err(e) => {
            warn!("Failed to load language data: {}", e.log_safe());
            LanguageBreakdown::NoData
        }
    }
}
