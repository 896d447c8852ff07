//! Persisted user preferences (currently just the color theme).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Best guess at the terminal's color scheme.
    ///
    /// `COLORFGBG` is "fg;bg" (sometimes "fg;default;bg"); backgrounds 7 and
    /// 15 are light. Anything else, or no hint at all, means dark.
    pub fn from_platform() -> Self {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|value| Self::from_colorfgbg(&value))
            .unwrap_or(Theme::Dark)
    }

    fn from_colorfgbg(value: &str) -> Option<Self> {
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        Some(if bg == 7 || bg == 15 {
            Theme::Light
        } else {
            Theme::Dark
        })
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::Validation(format!(
                "Invalid theme: {other}. Must be light or dark"
            ))),
        }
    }
}

/// On-disk layout of the preference file
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    theme: Option<Theme>,
}

/// Theme preference stored as JSON under the `theme` key
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored preference, if one was saved
    pub async fn stored(&self) -> Result<Option<Theme>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let prefs: StoredPreferences = serde_json::from_str(&content)?;
        Ok(prefs.theme)
    }

    /// Stored theme, falling back to the platform color scheme
    pub async fn load(&self) -> Theme {
        match self.stored().await {
            Ok(Some(theme)) => theme,
            Ok(None) => {
                debug!("No stored theme at {}, using platform default", self.path.display());
                Theme::from_platform()
            }
            Err(e) => {
                warn!(
                    "Ignoring unreadable preferences at {}: {}",
                    self.path.display(),
                    e.log_safe()
                );
                Theme::from_platform()
            }
        }
    }

    pub async fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(&StoredPreferences { theme: Some(theme) })?;
        tokio::fs::write(&self.path, content).await?;
        debug!("Saved theme '{}' to {}", theme.as_str(), self.path.display());
        Ok(())
    }

    /// Flip the current theme and persist the result
    pub async fn toggle(&self) -> Result<Theme> {
        let theme = self.load().await.toggle();
        self.save(theme).await?;
        Ok(theme)
    }
}
