pub mod commands;

use crate::render::{DateStyle, MissingFieldPolicy};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ghprofile")]
#[command(about = "Look up GitHub users: profile, repositories and languages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Per-invocation overrides of the display settings
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DisplayArgs {
    /// Number of languages shown in the chart
    #[arg(long, env = "TOP_LANGUAGES")]
    pub top: Option<usize>,

    /// Date format: absolute or relative
    #[arg(long, env = "DATE_STYLE")]
    pub date_style: Option<DateStyle>,

    /// Missing profile fields: hide or placeholder
    #[arg(long, env = "MISSING_FIELDS")]
    pub missing_fields: Option<MissingFieldPolicy>,

    /// Fetch repositories and languages one after the other
    #[arg(long)]
    pub sequential: bool,

    /// Disable colored output (also honored via NO_COLOR)
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a single user and print the result
    Lookup {
        /// GitHub username, @handle or profile URL
        username: String,

        /// Number of repository pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Print the session as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Interactive session: search, load more, retry and toggle the theme
    Interactive {
        /// Username to search right away
        username: Option<String>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Show or change the stored color theme
    Theme {
        /// show, toggle, light or dark
        #[arg(default_value = "show")]
        action: String,
    },
}
