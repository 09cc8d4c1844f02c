//! # Scholar Reference Exporter
//!
//! Retrieve a researcher's publication list from their Google Scholar
//! profile, keep the most recent N entries, format each one as a citation
//! string in a chosen bibliographic style, and export the result to a
//! spreadsheet.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Publication, AuthorProfile, etc.)
//! - [`sources`]: Profile retrieval behind the [`ProfileSource`] trait
//! - [`select`]: Selection of the most recent publications
//! - [`cite`]: Citation formatting in APA, MLA, Chicago, Harvard, Vancouver
//! - [`export`]: Spreadsheet export
//! - [`pipeline`]: End-to-end composition and error taxonomy
//! - [`utils`]: HTTP client, retry, validation, and display utilities
//! - [`config`]: Configuration management

pub mod cite;
pub mod config;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod select;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use cite::{format_reference, CitationStyle};
pub use models::Publication;
pub use select::select_recent;
pub use sources::{GoogleScholarSource, ProfileSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
