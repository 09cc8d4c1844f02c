//! HTTP client with built-in request-rate limiting.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Shared HTTP client that spaces requests out to a configured rate.
///
/// Scraped sources throttle aggressively, so every request goes through a
/// direct rate limiter before it is sent.
#[derive(Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a client with the default rate (1 request/second) and timeout
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_rate(1.0, Duration::from_secs(30))
    }

    /// Create a client with an explicit request rate and timeout
    pub fn with_rate(requests_per_second: f32, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        let period = Duration::from_secs_f32(1.0 / requests_per_second.max(0.01));
        let quota = Quota::with_period(period).unwrap_or_else(|| Quota::per_second(nonzero!(1u32)));

        Ok(Self {
            client: Arc::new(client),
            limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Start building a rate-limited GET request
    pub fn get(&self, url: &str) -> RateLimitedRequestBuilder {
        RateLimitedRequestBuilder {
            builder: self.client.get(url),
            limiter: Arc::clone(&self.limiter),
        }
    }
}

/// Builder for a request that waits for the rate limiter before sending
pub struct RateLimitedRequestBuilder {
    builder: reqwest::RequestBuilder,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl RateLimitedRequestBuilder {
    /// Add a header to the request
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Wait for a rate-limit slot, then send the request
    pub async fn send(self) -> Result<reqwest::Response, reqwest::Error> {
        self.limiter.until_ready().await;
        self.builder.send().await
    }
}
