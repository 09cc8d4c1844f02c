//! Reference formatting in the classic bibliographic styles.

use crate::models::Publication;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bibliographic citation style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationStyle {
    Apa,
    Mla,
    Chicago,
    Harvard,
    Vancouver,
}

impl CitationStyle {
    /// All supported styles, in menu order
    pub const ALL: [CitationStyle; 5] = [
        CitationStyle::Apa,
        CitationStyle::Mla,
        CitationStyle::Chicago,
        CitationStyle::Harvard,
        CitationStyle::Vancouver,
    ];

    /// Resolve a style from its name.
    ///
    /// Unrecognized names fall back to APA rather than failing, so a caller
    /// passing a style it read from user input always gets a citation.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "apa" => CitationStyle::Apa,
            "mla" => CitationStyle::Mla,
            "chicago" => CitationStyle::Chicago,
            "harvard" => CitationStyle::Harvard,
            "vancouver" => CitationStyle::Vancouver,
            _ => CitationStyle::Apa,
        }
    }

    /// Style label as used in filenames and column headers
    pub fn label(&self) -> &'static str {
        match self {
            CitationStyle::Apa => "APA",
            CitationStyle::Mla => "MLA",
            CitationStyle::Chicago => "Chicago",
            CitationStyle::Harvard => "Harvard",
            CitationStyle::Vancouver => "Vancouver",
        }
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Format one publication as a single-line citation string.
///
/// Pure and infallible: absent fields degrade to fallback text (author to
/// "Unknown Author", year to "n.d.", title to "No Title", venue and the
/// Vancouver volume/pages to empty strings) instead of erroring.
pub fn format_reference(publication: &Publication, style: CitationStyle) -> String {
    let author = publication.author.as_deref().unwrap_or("Unknown Author");
    let year = publication.pub_year.as_deref().unwrap_or("n.d.");
    let title = publication.title.as_deref().unwrap_or("No Title");
    let journal = publication.journal.as_deref().unwrap_or("");
    let volume = publication.volume.as_deref().unwrap_or("");
    let pages = publication.pages.as_deref().unwrap_or("");

    match style {
        CitationStyle::Apa => format!("{} ({}). {}. {}.", author, year, title, journal),
        CitationStyle::Mla => format!("{}. \"{}.\" {}, {}.", author, title, journal, year),
        CitationStyle::Chicago => format!("{}. \"{}.\" {} ({}).", author, title, journal, year),
        CitationStyle::Harvard => format!("{} ({}) '{}', {}.", author, year, title, journal),
        CitationStyle::Vancouver => format!(
            "{}. {}. {}. {};{}:{}",
            author, title, journal, year, volume, pages
        ),
    }
}
