//! Author profile model as returned by a profile source.

use serde::{Deserialize, Serialize};

/// One publication as listed on a profile page, before expansion.
///
/// The profile listing only carries the title, the year column, and an
/// opaque citation-view id that the source uses to fetch the full record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationStub {
    /// Title as shown in the profile listing
    pub title: String,

    /// Year column text, when present
    pub year: Option<String>,

    /// Source-specific id used to expand this entry into a full record
    pub citation_id: Option<String>,
}

impl PublicationStub {
    /// Create a stub with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            citation_id: None,
        }
    }

    /// Set the year column text
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Set the citation-view id
    pub fn citation_id(mut self, id: impl Into<String>) -> Self {
        self.citation_id = Some(id.into());
        self
    }
}

/// A researcher's profile with its publication listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    /// Profile identifier (the `user=` token)
    pub user_id: String,

    /// Display name
    pub name: String,

    /// Affiliation line, when the profile carries one
    pub affiliation: Option<String>,

    /// Publications in profile-listing order
    pub publications: Vec<PublicationStub>,
}

impl AuthorProfile {
    /// Create a profile with no publications
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            affiliation: None,
            publications: Vec::new(),
        }
    }

    /// Number of publications listed on the profile
    pub fn publication_count(&self) -> usize {
        self.publications.len()
    }
}
