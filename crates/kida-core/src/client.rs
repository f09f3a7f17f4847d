//! HTTP client for KIDA
//!
//! Provides a rate-limited HTTP client that posts search forms and
//! fetches result pages. Failures are returned as-is; nothing is retried.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

use reqwest::header::{CONTENT_TYPE, HeaderValue};

use crate::error::{KidaError, Result};
use crate::query::encode_form;
use crate::url::{DEFAULT_TIMEOUT_SECS, KIDA_BASE_URL};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root URL of the KIDA server (default: [`KIDA_BASE_URL`])
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Maximum requests per second; zero or less disables spacing (default: 2.0)
    pub requests_per_second: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: KIDA_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            requests_per_second: 2.0,
        }
    }
}

impl ClientConfig {
    /// Default request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Rate limiter to control request frequency
///
/// Ensures requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// A non-positive or non-finite rate yields a limiter that never waits.
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = if requests_per_second.is_finite() && requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::ZERO
        };
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Acquire permission to make a request
    ///
    /// If called before the minimum interval has passed since the last request,
    /// this method will sleep until the interval has elapsed.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// HTTP client wrapper for the KIDA web interface
///
/// Handles all HTTP communication with KIDA:
/// - Rate limiting between consecutive requests
/// - Form-encoded POST for search submissions
/// - Plain GET for result pages
pub struct KidaClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
    base_url: String,
    timeout: Duration,
}

impl KidaClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(KidaError::TransportError)?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
        })
    }

    /// Root URL every request is built from
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Timeout applied when the caller does not pass one
    pub fn default_timeout(&self) -> Duration {
        self.timeout
    }

    /// Submit a search form and return the first result page
    ///
    /// # Arguments
    /// * `url` - Full search endpoint URL
    /// * `params` - Ordered form parameters
    /// * `timeout` - Upper bound for the whole request
    ///
    /// # Errors
    /// `TransportError` on connection failure, timeout or non-2xx status
    pub async fn post_form(
        &self,
        url: &str,
        params: &[(String, String)],
        timeout: Duration,
    ) -> Result<String> {
        self.rate_limiter.acquire().await;
        log::debug!("POST {} ({} form fields)", url, params.len());

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
            .body(encode_form(params))
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }

    /// Fetch a result page
    ///
    /// # Errors
    /// `TransportError` on connection failure, timeout or non-2xx status
    pub async fn fetch(&self, url: &str, timeout: Duration) -> Result<String> {
        self.rate_limiter.acquire().await;
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }

    /// Get a reference to the rate limiter (for testing)
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}
