use super::chart::{ChartData, ChartRenderer, TextChart};
use super::{FieldView, ProfileView};
use crate::preferences::Theme;
use crate::session::{LanguageBreakdown, Phase, RegionStatus, RepositoryRegion, SessionSnapshot};
use crate::utils::sanitize::{sanitize_text, truncate};

const DESCRIPTION_WIDTH: usize = 72;

/// ANSI styling for one theme; all no-ops when color is off
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    ansi: bool,
    theme: Theme,
}

impl Palette {
    pub fn new(theme: Theme, ansi: bool) -> Self {
        Self { ansi, theme }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.ansi {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        match self.theme {
            Theme::Dark => self.paint("1;38;2;139;226;250", text),
            Theme::Light => self.paint("1;38;2;9;105;218", text),
        }
    }

    fn muted(&self, text: &str) -> String {
        match self.theme {
            Theme::Dark => self.paint("38;2;156;163;175", text),
            Theme::Light => self.paint("38;2;87;96;106", text),
        }
    }

    fn error(&self, text: &str) -> String {
        self.paint("31", text)
    }
}

/// Point the chart at the session's language breakdown
pub fn sync_chart<C: ChartRenderer>(chart: &mut C, languages: Option<&LanguageBreakdown>) {
    match languages {
        Some(LanguageBreakdown::Chart(shares)) => chart.render(&ChartData::from_shares(shares)),
        Some(LanguageBreakdown::NoData) => chart.render_no_data(),
        None => chart.destroy(),
    }
}

/// Whole session as printable text
pub fn format_snapshot(snapshot: &SessionSnapshot, chart: &TextChart, palette: Palette) -> String {
    match &snapshot.phase {
        Phase::Idle => String::new(),
        Phase::Loading => palette.muted("Loading..."),
        Phase::Error { message, .. } => palette.error(&format!("\u{2717} {message}")),
        Phase::Loaded => {
            let mut out = Vec::new();
            if let Some(profile) = &snapshot.profile {
                out.push(format_profile(profile, palette));
            }
            if let Some(region) = &snapshot.repositories {
                out.push(format_repositories(region, palette));
            }
            if snapshot.languages.is_some() {
                out.push(format!("{}\n{}", palette.heading("Languages"), chart.frame()));
            }
            out.join("\n\n")
        }
    }
}

pub fn format_profile(profile: &ProfileView, palette: Palette) -> String {
    let mut lines = vec![
        format!(
            "{} {}",
            palette.heading(&sanitize_text(&profile.display_name)),
            palette.muted(&profile.handle)
        ),
        sanitize_text(&profile.bio),
    ];

    for (label, field) in [
        ("Location", &profile.location),
        ("Company", &profile.company),
        ("Blog", &profile.blog),
        ("Twitter", &profile.social),
    ] {
        if let Some(line) = format_field(label, field) {
            lines.push(format!("  {line}"));
        }
    }

    lines.push(format!("  {}", profile.joined));
    lines.push(format!("  {}", palette.muted(&profile.profile_url)));
    lines.push(String::new());
    lines.push(format!(
        "  Followers {}   Following {}   Repos {}",
        profile.followers, profile.following, profile.repositories
    ));
    lines.join("\n")
}

fn format_field(label: &str, field: &FieldView) -> Option<String> {
    match field {
        FieldView::Hidden => None,
        FieldView::Plain { text } => Some(format!("{label}: {}", sanitize_text(text))),
        FieldView::Linked { text, href } => Some(format!(
            "{label}: {} <{}>",
            sanitize_text(text),
            sanitize_text(href)
        )),
    }
}

pub fn format_repositories(region: &RepositoryRegion, palette: Palette) -> String {
    let mut lines = vec![format!(
        "{} ({})",
        palette.heading("Repositories"),
        region.summary
    )];

    match region.status {
        RegionStatus::Loading => lines.push(palette.muted("  Loading repositories...")),
        RegionStatus::Empty | RegionStatus::Failed => {
            if let Some(message) = &region.message {
                lines.push(format!("  {message}"));
            }
        }
        RegionStatus::Ready => {
            for card in &region.cards {
                let fork = if card.is_fork { " [Fork]" } else { "" };
                lines.push(format!("  {}{fork}", palette.heading(&sanitize_text(&card.name))));
                lines.push(format!(
                    "    {}",
                    truncate(&sanitize_text(&card.description), DESCRIPTION_WIDTH)
                ));

                let mut meta = Vec::new();
                if let Some(language) = &card.language {
                    meta.push(sanitize_text(language));
                }
                meta.push(format!("\u{2605} {}", card.stars));
                meta.push(format!("\u{2442} {}", card.forks));
                meta.push(format!("updated {}", card.updated));
                lines.push(format!("    {}", palette.muted(&meta.join(" \u{b7} "))));
                lines.push(format!("    {}", palette.muted(&card.url)));
            }
            if let Some(message) = &region.message {
                lines.push(palette.error(&format!("  {message}")));
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RepositoryCard;

    fn profile_view() -> ProfileView {
        ProfileView {
            avatar_url: None,
            display_name: "The Octocat".to_string(),
            handle: "@octocat".to_string(),
            bio: "No bio available".to_string(),
            location: FieldView::Hidden,
            company: FieldView::Plain {
                text: "Acme".to_string(),
            },
            blog: FieldView::Linked {
                text: "example.com".to_string(),
                href: "https://example.com".to_string(),
            },
            social: FieldView::Hidden,
            joined: "Joined Jan 25, 2011".to_string(),
            profile_url: "https://github.com/octocat".to_string(),
            followers: "12.3K".to_string(),
            following: "9".to_string(),
            repositories: "8".to_string(),
        }
    }

    #[test]
    fn test_format_profile_skips_hidden_fields() {
        let text = format_profile(&profile_view(), Palette::new(Theme::Dark, false));

        assert!(text.starts_with("The Octocat @octocat"));
        assert!(text.contains("Company: Acme"));
        assert!(text.contains("Blog: example.com <https://example.com>"));
        assert!(!text.contains("Location"));
        assert!(!text.contains("Twitter"));
        assert!(text.contains("Followers 12.3K"));
    }

    #[test]
    fn test_format_repositories() {
        let region = RepositoryRegion {
            status: RegionStatus::Ready,
            cards: vec![RepositoryCard {
                name: "hello\x1b[2J".to_string(),
                url: "https://github.com/octocat/hello".to_string(),
                description: "Hi".to_string(),
                language: Some("Rust".to_string()),
                stars: "3".to_string(),
                forks: "0".to_string(),
                is_fork: true,
                updated: "yesterday".to_string(),
            }],
            summary: "1 of 1 repos".to_string(),
            can_load_more: false,
            message: None,
        };

        let text = format_repositories(&region, Palette::new(Theme::Light, false));
        assert!(text.starts_with("Repositories (1 of 1 repos)"));
        assert!(text.contains("hello[2J [Fork]"));
        assert!(!text.contains('\x1b'));
        assert!(text.contains("Rust \u{b7} \u{2605} 3"));
    }

    #[test]
    fn test_format_error_phase() {
        let snapshot = SessionSnapshot {
            username: Some("ghost".to_string()),
            phase: Phase::Error {
                message: "User not found.".to_string(),
                not_found: true,
            },
            profile: None,
            repositories: None,
            languages: None,
        };
        let chart = TextChart::new(Theme::Dark, false);
        let text = format_snapshot(&snapshot, &chart, Palette::new(Theme::Dark, false));
        assert_eq!(text, "\u{2717} User not found.");
    }

    #[test]
    fn test_sync_chart() {
        let mut chart = TextChart::new(Theme::Dark, false);
        sync_chart(&mut chart, Some(&LanguageBreakdown::NoData));
        assert_eq!(chart.frame(), crate::render::chart::NO_LANGUAGE_DATA);

        sync_chart(&mut chart, None);
        assert_eq!(chart.frame(), "");
    }
}
