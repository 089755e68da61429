use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdgarError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Connection to {url} failed: {message}")]
    TransientNetwork { url: String, message: String },

    #[error("Resource not found")]
    NotFound,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No XBRL instance document link found on {page}")]
    NoStructuredDataLink { page: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Could not encode query string: {0}")]
    QueryEncoding(#[from] serde_urlencoded::ser::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl EdgarError {
    /// Returns true for connection-level failures that are worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, EdgarError::TransientNetwork { .. })
    }
}

pub type Result<T> = std::result::Result<T, EdgarError>;
