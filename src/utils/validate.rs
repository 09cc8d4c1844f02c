//! Input validation for profile URLs.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Validation error types
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("no profile identifier found in URL: {0}")]
    MissingUserId(String),

    #[error("empty profile URL")]
    EmptyUrl,
}

static USER_ID_RE: OnceLock<Regex> = OnceLock::new();

fn user_id_re() -> &'static Regex {
    // word characters and hyphens, as used in profile ids
    USER_ID_RE.get_or_init(|| Regex::new(r"user=([\w-]+)").expect("valid user id pattern"))
}

/// Extract the profile identifier from a profile URL.
///
/// Matches the `user=<token>` query parameter anywhere in the string, so
/// both full profile URLs and bare query fragments are accepted. A missing
/// match is a user-input error, reported before any retrieval is attempted.
pub fn extract_user_id(url: &str) -> Result<String, ValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    user_id_re()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ValidationError::MissingUserId(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_from_full_url() {
        let url = "https://scholar.google.com/citations?user=A1bC-3dEfG&hl=en";
        assert_eq!(extract_user_id(url).unwrap(), "A1bC-3dEfG");
    }

    #[test]
    fn test_extracts_from_query_fragment() {
        assert_eq!(extract_user_id("user=xYz_9").unwrap(), "xYz_9");
    }

    #[test]
    fn test_token_stops_at_next_parameter() {
        let url = "https://scholar.google.com/citations?hl=en&user=abc123&view_op=list_works";
        assert_eq!(extract_user_id(url).unwrap(), "abc123");
    }

    #[test]
    fn test_missing_user_parameter() {
        let err = extract_user_id("https://scholar.google.com/citations?hl=en").unwrap_err();
        assert!(matches!(err, ValidationError::MissingUserId(_)));
    }

    #[test]
    fn test_empty_url() {
        assert_eq!(extract_user_id("   "), Err(ValidationError::EmptyUrl));
    }
}
