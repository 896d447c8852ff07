pub mod config;
pub mod error;

// GitHub data source
pub mod github;

// Session state, pagination and language aggregation
pub mod session;

// View models and terminal output
pub mod render;

pub mod preferences;

pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
