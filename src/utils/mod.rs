//! Utility modules supporting profile retrieval and CLI output.
//!
//! - [`HttpClient`]: HTTP client with built-in request-rate limiting
//! - [`RateLimitedRequestBuilder`]: builder for rate-limited HTTP requests
//! - [`RetryConfig`] / [`with_retry`]: automatic retry on transient errors
//! - [`extract_user_id`]: profile-id extraction from a profile URL
//! - [`truncate_with_ellipsis`]: terminal-width-aware text truncation

mod display;
mod http;
mod retry;
mod validate;

pub use display::{is_terminal, terminal_width, truncate_with_ellipsis};
pub use http::{HttpClient, RateLimitedRequestBuilder};
pub use retry::{scrape_retry_config, with_retry, RetryConfig, TransientError};
pub use validate::{extract_user_id, ValidationError};
