pub mod client;
pub mod config;
pub mod models;
pub mod parser;
pub mod rate_limit;

pub use client::GitHubClient;
pub use config::GitHubConfig;
pub use models::{Profile, RepositorySummary};
pub use parser::parse_username;
pub use rate_limit::RateLimitStatus;
