use crate::error::{Error, Result};
use crate::github::config::{GitHubConfig, MAX_PAGE_SIZE};
use crate::render::{DateStyle, MissingFieldPolicy, RenderOptions};
use crate::session::{ControllerOptions, FetchMode};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Settings {
    pub github: GitHubConfig,
    pub display: DisplayConfig,
    pub preferences: PreferencesConfig,
}

#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub top_languages: usize,
    pub date_style: DateStyle,
    pub missing_fields: MissingFieldPolicy,
    pub fetch_mode: FetchMode,
}

#[derive(Debug, Clone)]
pub struct PreferencesConfig {
    pub path: PathBuf,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let top_languages = std::env::var("TOP_LANGUAGES")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid TOP_LANGUAGES value".to_string()))?;

        let date_style = std::env::var("DATE_STYLE")
            .unwrap_or_else(|_| "relative".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DATE_STYLE value".to_string()))?;

        let missing_fields = std::env::var("MISSING_FIELDS")
            .unwrap_or_else(|_| "hide".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MISSING_FIELDS value".to_string()))?;

        let fetch_mode = std::env::var("FETCH_MODE")
            .unwrap_or_else(|_| "concurrent".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid FETCH_MODE value".to_string()))?;

        let path = std::env::var("PREFERENCES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_preferences_path());

        Ok(Settings {
            github: GitHubConfig::from_env(),
            display: DisplayConfig {
                top_languages,
                date_style,
                missing_fields,
                fetch_mode,
            },
            preferences: PreferencesConfig { path },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(self.github.api_base_url())?;

        if self.github.request_timeout.is_zero() {
            return Err(Error::Config("Request timeout must be non-zero".to_string()));
        }

        if self.github.page_size == 0 || self.github.page_size > MAX_PAGE_SIZE {
            return Err(Error::Config(format!(
                "Repository page size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        if self.github.language_sample_size == 0
            || self.github.language_sample_size > MAX_PAGE_SIZE
        {
            return Err(Error::Config(format!(
                "Language sample size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        if self.display.top_languages == 0 {
            return Err(Error::Config("TOP_LANGUAGES must be non-zero".to_string()));
        }

        Ok(())
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            render: RenderOptions {
                date_style: self.display.date_style,
                missing_fields: self.display.missing_fields,
            },
            top_languages: self.display.top_languages,
            fetch_mode: self.display.fetch_mode,
        }
    }
}

/// `$XDG_CONFIG_HOME/ghprofile`, then `$HOME/.config/ghprofile`, then the
/// working directory
fn default_preferences_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .filter(|s| !s.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        });

    match config_dir {
        Some(dir) => dir.join("ghprofile").join("preferences.json"),
        None => PathBuf::from(".ghprofile.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn base_settings() -> Settings {
        Settings {
            github: GitHubConfig::default(),
            display: DisplayConfig {
                top_languages: 5,
                date_style: DateStyle::Relative,
                missing_fields: MissingFieldPolicy::Hide,
                fetch_mode: FetchMode::Concurrent,
            },
            preferences: PreferencesConfig {
                path: "/tmp/ghprofile/preferences.json".into(),
            },
        }
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = base_settings();
        assert!(settings.validate().is_ok());

        settings.github.page_size = 0;
        assert!(settings.validate().is_err());

        let mut settings = base_settings();
        settings.github.language_sample_size = 101;
        assert!(settings.validate().is_err());

        let mut settings = base_settings();
        settings.github.request_timeout = Duration::ZERO;
        assert!(settings.validate().is_err());

        let mut settings = base_settings();
        settings.github.api_base_url = "not a url".to_string();
        assert!(matches!(settings.validate(), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_controller_options() {
        let mut settings = base_settings();
        settings.display.top_languages = 7;
        settings.display.fetch_mode = FetchMode::Sequential;

        let options = settings.controller_options();
        assert_eq!(options.top_languages, 7);
        assert_eq!(options.fetch_mode, FetchMode::Sequential);
        assert_eq!(options.render.date_style, DateStyle::Relative);
    }
}
