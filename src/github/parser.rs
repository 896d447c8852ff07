use crate::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

/// GitHub caps logins at 39 characters
const MAX_LOGIN_LEN: usize = 39;

fn login_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Legacy accounts may contain consecutive or trailing hyphens
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*$").unwrap())
}

/// Extract a GitHub login from user input
/// Accepts formats:
/// - octocat
/// - @octocat
/// - github.com/octocat
/// - https://github.com/octocat/
pub fn parse_username(input: &str) -> Result<String> {
    let input = input.trim();

    if input.is_empty() {
        return Err(Error::Validation("Please enter a GitHub username".to_string()));
    }

    let input = input.trim_end_matches('/');

    // Remove protocol if present
    let input = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
        .unwrap_or(input);

    // Remove github.com if present
    let input = input
        .strip_prefix("www.github.com/")
        .or_else(|| input.strip_prefix("github.com/"))
        .unwrap_or(input);

    let login = input.strip_prefix('@').unwrap_or(input).trim();

    if login.is_empty() {
        return Err(Error::Validation("Please enter a GitHub username".to_string()));
    }

    if login.len() > MAX_LOGIN_LEN || !login_pattern().is_match(login) {
        return Err(Error::Validation(format!(
            "'{login}' is not a valid GitHub username"
        )));
    }

    Ok(login.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_login() {
        assert_eq!(parse_username("octocat").unwrap(), "octocat");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_username("  torvalds \n").unwrap(), "torvalds");
    }

    #[test]
    fn test_parse_handle_with_sigil() {
        assert_eq!(parse_username("@octocat").unwrap(), "octocat");
    }

    #[test]
    fn test_parse_profile_url() {
        assert_eq!(
            parse_username("https://github.com/octocat/").unwrap(),
            "octocat"
        );
        assert_eq!(parse_username("github.com/rust-lang").unwrap(), "rust-lang");
    }

    #[test]
    fn test_parse_empty_is_validation_error() {
        assert!(matches!(parse_username(""), Err(Error::Validation(_))));
        assert!(matches!(parse_username("   "), Err(Error::Validation(_))));
        assert!(matches!(parse_username("@"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_parse_rejects_invalid_logins() {
        assert!(parse_username("-leading").is_err());
        assert!(parse_username("has space").is_err());
        assert!(parse_username("octocat/hello-world").is_err());
        assert!(parse_username(&"a".repeat(40)).is_err());
    }
}
