use std::time::Duration;

/// Configuration for the Edgar client
#[derive(Debug, Clone)]
pub struct EdgarConfig {
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// Rate limit in requests per second
    pub rate_limit: u32,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Base URLs for the EDGAR pages this crate reads
    pub base_urls: EdgarUrls,
    /// Retry behaviour for connection failures
    pub retry: RetryPolicy,
}

/// Base URLs for the EDGAR web interface
#[derive(Debug, Clone)]
pub struct EdgarUrls {
    /// Host that relative links on EDGAR pages are resolved against
    pub www: String,
    /// The company browse endpoint (filings index)
    pub browse: String,
}

/// Linear backoff for connection-level failures.
///
/// Attempt `n` (zero-based) is preceded by a wait of `(n - 1) * backoff_step`,
/// so the first retry is immediate, the second waits one step, and so on.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Increment added to the wait after every failed attempt
    pub backoff_step: Duration,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: "xbrl_filings/0.1.0".to_string(),
            rate_limit: 10,
            timeout: Duration::from_secs(30),
            base_urls: EdgarUrls::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl EdgarConfig {
    /// Creates a new EdgarConfig with custom settings
    ///
    /// # Basic usage
    ///
    /// ```rust
    /// use xbrl_filings::{Edgar, EdgarConfig};
    /// use std::time::Duration;
    /// let config = EdgarConfig::new(
    ///     "YourAppName contact@example.com",
    ///     10, // requests per second
    ///     Duration::from_secs(30),
    ///     None,
    /// );
    /// let edgar = Edgar::with_config(config)?;
    /// # Ok::<(), xbrl_filings::EdgarError>(())
    /// ```
    pub fn new(
        user_agent: impl Into<String>,
        rate_limit: u32,
        timeout: Duration,
        base_urls: Option<EdgarUrls>,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            rate_limit,
            timeout,
            base_urls: base_urls.unwrap_or_default(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

impl Default for EdgarUrls {
    fn default() -> Self {
        Self {
            www: "https://www.sec.gov".to_string(),
            browse: "https://www.sec.gov/cgi-bin/browse-edgar".to_string(),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_step: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Wait before the given zero-based retry.
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.backoff_step * retry
    }
}
