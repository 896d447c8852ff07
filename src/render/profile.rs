use super::format::{format_count, format_date, format_relative};
use super::{present, DateStyle, FieldView, MissingFieldPolicy, RenderOptions};
use crate::github::Profile;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const NO_BIO: &str = "No bio available";
pub const NOT_PROVIDED: &str = "Not provided";

/// Everything shown in the profile region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub avatar_url: Option<String>,
    pub display_name: String,
    pub handle: String,
    pub bio: String,
    pub location: FieldView,
    pub company: FieldView,
    pub blog: FieldView,
    pub social: FieldView,
    pub joined: String,
    pub profile_url: String,
    pub followers: String,
    pub following: String,
    pub repositories: String,
}

/// Map a fetched profile onto display fields
pub fn render_profile(
    profile: &Profile,
    options: &RenderOptions,
    now: DateTime<Utc>,
) -> ProfileView {
    let missing = || match options.missing_fields {
        MissingFieldPolicy::Hide => FieldView::Hidden,
        MissingFieldPolicy::Placeholder => FieldView::Plain {
            text: NOT_PROVIDED.to_string(),
        },
    };

    let location = present(profile.location.as_deref())
        .map(|text| FieldView::Plain {
            text: text.to_string(),
        })
        .unwrap_or_else(missing);

    let company = present(profile.company.as_deref())
        .map(strip_company_sigil)
        .filter(|text| !text.is_empty())
        .map(|text| FieldView::Plain { text })
        .unwrap_or_else(missing);

    let blog = present(profile.blog.as_deref())
        .map(|raw| FieldView::Linked {
            text: raw.to_string(),
            href: normalize_blog_url(raw),
        })
        .unwrap_or_else(missing);

    let social = present(profile.twitter_username.as_deref())
        .map(|handle| handle.trim_start_matches('@'))
        .filter(|handle| !handle.is_empty())
        .map(|handle| FieldView::Linked {
            text: format!("@{handle}"),
            href: format!("https://twitter.com/{handle}"),
        })
        .unwrap_or_else(missing);

    let joined = match options.date_style {
        DateStyle::Absolute => format_date(profile.created_at),
        DateStyle::Relative => format_relative(profile.created_at, now),
    };

    ProfileView {
        avatar_url: present(profile.avatar_url.as_deref()).map(str::to_string),
        display_name: present(profile.name.as_deref())
            .unwrap_or(&profile.login)
            .to_string(),
        handle: format!("@{}", profile.login),
        bio: present(profile.bio.as_deref())
            .unwrap_or(NO_BIO)
            .to_string(),
        location,
        company,
        blog,
        social,
        joined: format!("Joined {joined}"),
        profile_url: profile.html_url.clone(),
        followers: format_count(profile.followers),
        following: format_count(profile.following),
        repositories: format_count(profile.public_repos),
    }
}

/// Prefix `https://` unless the URL already carries an http(s) scheme
pub fn normalize_blog_url(raw: &str) -> String {
    let raw = raw.trim();
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

/// "@Acme" → "Acme"
pub fn strip_company_sigil(raw: &str) -> String {
    let raw = raw.trim();
    raw.strip_prefix('@').unwrap_or(raw).trim().to_string()
}
