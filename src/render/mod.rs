//! Pure view models for a profile session and their terminal rendering.
//!
//! Nothing in here performs I/O except [`terminal`], which prints the
//! views produced by the other modules.

pub mod chart;
pub mod format;
pub mod profile;
pub mod repos;
pub mod terminal;

use crate::{Error, Result};
use serde::Serialize;
use std::str::FromStr;

pub use chart::{language_color, ChartData, ChartRenderer, Rgb, TextChart};
pub use format::{format_count, format_date, format_relative};
pub use profile::{render_profile, ProfileView};
pub use repos::{render_repository, RepositoryCard};

/// How a join or update date is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    Absolute,
    #[default]
    Relative,
}

impl FromStr for DateStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "absolute" => Ok(DateStyle::Absolute),
            "relative" => Ok(DateStyle::Relative),
            other => Err(Error::Validation(format!(
                "Invalid date style: {other}. Must be absolute or relative"
            ))),
        }
    }
}

/// What to do with optional profile fields that are absent or blank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFieldPolicy {
    #[default]
    Hide,
    Placeholder,
}

impl FromStr for MissingFieldPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hide" => Ok(MissingFieldPolicy::Hide),
            "placeholder" => Ok(MissingFieldPolicy::Placeholder),
            other => Err(Error::Validation(format!(
                "Invalid missing-field policy: {other}. Must be hide or placeholder"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub date_style: DateStyle,
    pub missing_fields: MissingFieldPolicy,
}

/// One optional display field, decided once from the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldView {
    Linked { text: String, href: String },
    Plain { text: String },
    Hidden,
}

impl FieldView {
    pub fn is_visible(&self) -> bool {
        !matches!(self, FieldView::Hidden)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            FieldView::Linked { text, .. } | FieldView::Plain { text } => Some(text),
            FieldView::Hidden => None,
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            FieldView::Linked { href, .. } => Some(href),
            _ => None,
        }
    }
}

/// Trimmed value when present and non-blank
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
