use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile of a GitHub account (`GET /users/{username}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    /// Personal site; GitHub stores it verbatim, often without a scheme
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    pub avatar_url: Option<String>,
    pub html_url: String,
}

/// Repository entry as returned by `GET /users/{username}/repos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub fork: bool,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
}

impl RepositorySummary {
    /// Declared primary language, if any and non-blank
    pub fn declared_language(&self) -> Option<&str> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_github_payload() {
        let payload = r#"{
            "login": "octocat",
            "id": 583231,
            "name": "The Octocat",
            "company": "@github",
            "blog": "https://github.blog",
            "location": "San Francisco",
            "bio": null,
            "twitter_username": null,
            "public_repos": 8,
            "followers": 9999,
            "following": 9,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "html_url": "https://github.com/octocat",
            "created_at": "2011-01-25T18:44:36Z"
        }"#;

        let profile: Profile = serde_json::from_str(payload).unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.company.as_deref(), Some("@github"));
        assert!(profile.bio.is_none());
        assert_eq!(profile.followers, 9999);
        assert_eq!(profile.created_at.to_rfc3339(), "2011-01-25T18:44:36+00:00");
    }

    #[test]
    fn test_declared_language_ignores_blank() {
        let repo: RepositorySummary = serde_json::from_str(
            r#"{"name":"x","description":null,"language":"  ","stargazers_count":0,
                "forks_count":0,"fork":false,"updated_at":"2024-01-01T00:00:00Z",
                "html_url":"https://github.com/o/x"}"#,
        )
        .unwrap();
        assert_eq!(repo.declared_language(), None);
    }
}
