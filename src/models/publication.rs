//! Publication model representing one work's bibliographic data.

use serde::{Deserialize, Serialize};

/// The bibliographic fields of a single publication.
///
/// Profiles routinely carry incomplete entries (in-progress work without a
/// year, preprints without a venue), so every field is optional. Consumers
/// that need a concrete value substitute their own fallback text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Author names as one combined string, as published on the profile
    pub author: Option<String>,

    /// Publication title
    pub title: Option<String>,

    /// Publication year as text (may be absent or unparseable)
    pub pub_year: Option<String>,

    /// Journal or venue name
    pub journal: Option<String>,

    /// Volume number
    pub volume: Option<String>,

    /// Page range
    pub pages: Option<String>,

    /// Citation count reported by the source
    pub citations: Option<u32>,

    /// Page URL for this publication at the source
    pub url: Option<String>,
}

impl Publication {
    /// Create an empty publication
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the year field as an integer.
    ///
    /// Returns `None` when the field is absent, empty, or not an integer.
    pub fn year(&self) -> Option<i32> {
        self.pub_year.as_deref()?.trim().parse().ok()
    }

    /// Whether this publication carries a usable year
    pub fn has_year(&self) -> bool {
        self.year().is_some()
    }
}

/// Builder for constructing [`Publication`] values
#[derive(Debug, Clone, Default)]
pub struct PublicationBuilder {
    publication: Publication,
}

impl PublicationBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the combined author string
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.publication.author = Some(author.into());
        self
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.publication.title = Some(title.into());
        self
    }

    /// Set the publication year text
    pub fn pub_year(mut self, year: impl Into<String>) -> Self {
        self.publication.pub_year = Some(year.into());
        self
    }

    /// Set the journal/venue name
    pub fn journal(mut self, journal: impl Into<String>) -> Self {
        self.publication.journal = Some(journal.into());
        self
    }

    /// Set the volume
    pub fn volume(mut self, volume: impl Into<String>) -> Self {
        self.publication.volume = Some(volume.into());
        self
    }

    /// Set the page range
    pub fn pages(mut self, pages: impl Into<String>) -> Self {
        self.publication.pages = Some(pages.into());
        self
    }

    /// Set the citation count
    pub fn citations(mut self, count: u32) -> Self {
        self.publication.citations = Some(count);
        self
    }

    /// Set the publication URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.publication.url = Some(url.into());
        self
    }

    /// Build the Publication
    pub fn build(self) -> Publication {
        self.publication
    }
}
