use async_trait::async_trait;
use governor::{
    Quota, RateLimiter, clock::DefaultClock, middleware::NoOpMiddleware, state::InMemoryState,
    state::NotKeyed,
};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::error::Error as _;
use std::io::ErrorKind;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::config::{EdgarConfig, EdgarUrls};
use super::error::{EdgarError, Result};
use super::fetch::{ResilientFetcher, Transport};

type Governor = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Rate-limited HTTP transport making exactly one attempt per call.
///
/// Connection failures are reported as [`EdgarError::TransientNetwork`] so the
/// [`ResilientFetcher`] can retry them. HTTP status errors are final.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,

    /// Token bucket rate limiter for SEC compliance
    rate_limiter: Arc<Governor>,
}

impl HttpTransport {
    /// Builds the reqwest client with the configured user agent and timeout.
    ///
    /// # Errors
    ///
    /// Returns `EdgarError::ConfigError` if the user agent is malformed, the rate limit
    /// is zero, or the HTTP client cannot be built.
    pub fn new(config: &EdgarConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| EdgarError::ConfigError(format!("Invalid user agent: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| EdgarError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            NonZeroU32::new(config.rate_limit).ok_or_else(|| {
                EdgarError::ConfigError("Rate limit must be greater than zero".to_string())
            })?,
        )));

        Ok(Self {
            client,
            rate_limiter,
        })
    }
}

/// Whether `error` means the connection could not be made or was dropped
/// before a response arrived.
fn is_connection_failure(error: &reqwest::Error) -> bool {
    if error.is_connect() {
        return true;
    }
    if !error.is_request() {
        return false;
    }

    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(hyper_error) = cause.downcast_ref::<hyper::Error>() {
            if hyper_error.is_incomplete_message() {
                return true;
            }
        }
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            if matches!(
                io_error.kind(),
                ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted | ErrorKind::BrokenPipe
            ) {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &str) -> Result<String> {
        self.rate_limiter.until_ready().await;

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if is_connection_failure(&e) => {
                return Err(EdgarError::TransientNetwork {
                    url: url.to_string(),
                    message: e.to_string(),
                });
            }
            Err(e) => return Err(EdgarError::RequestError(e)),
        };

        match response.status() {
            status if status.is_success() => {
                response.text().await.map_err(EdgarError::RequestError)
            }
            reqwest::StatusCode::NOT_FOUND => Err(EdgarError::NotFound),
            reqwest::StatusCode::TOO_MANY_REQUESTS => Err(EdgarError::RateLimitExceeded),
            other_status => {
                let error_body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Failed to read error body".to_string());

                Err(EdgarError::InvalidResponse(format!(
                    "Unexpected status code: {} for URL: {}. Response preview: {}",
                    other_status,
                    url,
                    error_body.chars().take(200).collect::<String>()
                )))
            }
        }
    }
}

/// Client for discovering XBRL filings through the EDGAR browse pages.
///
/// `Edgar` owns a [`ResilientFetcher`] and the base URLs of the EDGAR web
/// interface. All network access goes through the fetcher, one request at a
/// time, so an entity's filings are always retrieved sequentially.
///
/// The transport is a type parameter so tests (or callers with their own HTTP
/// stack) can supply pages without touching the network.
///
/// # Examples
///
/// ```rust
/// # use xbrl_filings::Edgar;
/// let edgar = Edgar::new("my_app/1.0 (my@email.com)")?;
/// # Ok::<(), xbrl_filings::EdgarError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Edgar<T = HttpTransport> {
    pub(crate) fetcher: ResilientFetcher<T>,

    /// Host used to resolve relative links found on EDGAR pages
    pub(crate) www_url: Url,

    /// The company browse endpoint
    pub(crate) browse_url: String,
}

impl Edgar<HttpTransport> {
    /// Creates a new Edgar client with sensible defaults for most use cases.
    ///
    /// Uses a rate limit of 10 requests per second (as required by SEC.gov), a
    /// 30-second timeout, five attempts per request and the standard SEC.gov URLs.
    ///
    /// # Arguments
    ///
    /// * `user_agent` - A descriptive identifier for your application, following the format
    ///   "AppName/Version (contact@email.com)". The SEC rejects anonymous clients.
    pub fn new(user_agent: &str) -> Result<Self> {
        let config = EdgarConfig {
            user_agent: user_agent.to_string(),
            rate_limit: 10,
            timeout: Duration::from_secs(30),
            ..EdgarConfig::default()
        };
        Self::with_config(config)
    }

    /// Creates an Edgar client with custom configuration settings.
    ///
    /// # Errors
    ///
    /// Returns `EdgarError::ConfigError` if the user agent is malformed, the rate limit
    /// is zero or the retry policy allows no attempts, and `EdgarError::InvalidUrl`
    /// if the configured host is not a valid URL.
    pub fn with_config(config: EdgarConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Edgar<T> {
    /// Creates a client that sends its requests through `transport`.
    ///
    /// The user agent, rate limit and timeout of `config` are not used here;
    /// they belong to the transport.
    pub fn with_transport(config: EdgarConfig, transport: T) -> Result<Self> {
        let EdgarUrls { www, browse } = config.base_urls;
        Ok(Edgar {
            fetcher: ResilientFetcher::new(transport, config.retry)?,
            www_url: Url::parse(&www)?,
            browse_url: browse,
        })
    }

    /// Fetches the text body of `url`, retrying connection failures.
    ///
    /// This is the raw-text primitive downstream consumers use to read
    /// XBRL instance documents or any other EDGAR resource.
    pub async fn get(&self, url: &str) -> Result<String> {
        self.fetcher.fetch(url).await
    }

    /// Returns the host that relative EDGAR links are resolved against.
    pub fn www_url(&self) -> &Url {
        &self.www_url
    }

    /// Returns the company browse endpoint.
    pub fn browse_url(&self) -> &str {
        &self.browse_url
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        self.fetcher.transport()
    }
}
