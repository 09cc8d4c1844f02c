//! Profile retrieval sources.
//!
//! This module defines the [`ProfileSource`] trait, the narrow interface
//! the pipeline depends on for remote data. The real implementation is
//! [`GoogleScholarSource`]; tests substitute [`MockProfileSource`] to run
//! the pipeline against canned records without network I/O.

mod scholar;

pub mod mock;

pub use mock::MockProfileSource;
pub use scholar::GoogleScholarSource;

use crate::models::{AuthorProfile, Publication, PublicationStub};
use async_trait::async_trait;

/// Interface to an academic-profile provider.
///
/// Both operations may fail or return partial data; callers are expected
/// to tolerate publications with missing fields.
#[async_trait]
pub trait ProfileSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "google_scholar")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Fetch a profile and its publication listing by profile id
    async fn lookup_profile(&self, user_id: &str) -> Result<AuthorProfile, SourceError>;

    /// Expand a listed publication into its full bibliographic record
    async fn expand(&self, stub: &PublicationStub) -> Result<Publication, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("network error: {0}")]
    Network(String),

    /// Parsing error (HTML structure not as expected)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Rate limit exceeded
    #[error("rate limit exceeded")]
    RateLimit,

    /// Profile or publication not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Error reported by the remote service
    #[error("API error: {0}")]
    Api(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}
