use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout
        } else if e.is_decode() {
            Error::Decode(e.to_string())
        } else {
            Error::Network(e.to_string())
        }
    }
}

impl Error {
    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            // Transport errors can echo full URLs including query strings
            Error::Network(_) => "External HTTP request failed".to_string(),
            Error::Decode(_) => "Malformed response from GitHub".to_string(),

            Error::Internal(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("password")
                    || lower.contains("secret")
                    || lower.contains("token")
                    || lower.contains("key")
                {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            Error::Validation(msg) => format!("Validation error: {msg}"),
            Error::NotFound(msg) => format!("Not found: {msg}"),
            Error::Api { status, .. } => format!("GitHub API error: HTTP {status}"),
            Error::Timeout => "Request timed out".to_string(),
            Error::Config(msg) => format!("Configuration error: {msg}"),
            Error::InvalidUrl(_) => "Invalid URL provided".to_string(),
            Error::Io(_) => "File system operation failed".to_string(),
            Error::Json(_) => "JSON serialization failed".to_string(),
        }
    }

    /// Message shown to the user in the error state of a session
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::NotFound(_) => {
                "User not found. Check the username and try again.".to_string()
            }
            Error::Api { status, message } => {
                format!("GitHub returned an error (HTTP {status}): {message}")
            }
            Error::Timeout => "The request timed out. Please try again.".to_string(),
            Error::Network(_) | Error::Decode(_) => {
                "Could not reach GitHub. Check your connection and try again.".to_string()
            }
            Error::Config(_) | Error::InvalidUrl(_) => self.to_string(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// Whether this error means the requested user does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
