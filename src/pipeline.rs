//! The export pipeline: extract id, retrieve, select, format.
//!
//! The pipeline is UI-agnostic: it takes a [`ProfileSource`] and returns
//! formatted rows, so the CLI, a web handler, and the test suite all drive
//! it the same way.

use crate::cite::{format_reference, CitationStyle};
use crate::config::FetchConfig;
use crate::export::ReferenceRow;
use crate::models::Publication;
use crate::select::select_recent;
use crate::sources::{ProfileSource, SourceError};
use crate::utils::{extract_user_id, ValidationError};

/// One export run's parameters
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Profile URL as supplied by the user
    pub profile_url: String,

    /// How many recent publications to keep
    pub count: usize,

    /// Citation style for the formatted output
    pub style: CitationStyle,
}

impl ExportRequest {
    /// Create a request
    pub fn new(profile_url: impl Into<String>, count: usize, style: CitationStyle) -> Self {
        Self {
            profile_url: profile_url.into(),
            count,
            style,
        }
    }
}

/// Pipeline failure, tagged with the step that failed.
///
/// An empty result is NOT an error: `run` returns `Ok` with an empty list
/// and the caller reports it as a distinct, non-fatal outcome.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The profile URL carried no `user=` identifier; nothing was retrieved
    #[error("invalid profile URL: {0}")]
    InvalidProfileUrl(#[from] ValidationError),

    /// The profile lookup against the source failed
    #[error("profile lookup failed: {0}")]
    Lookup(#[source] SourceError),

    /// Expanding one listed publication failed
    #[error("failed to expand publication \"{title}\": {source}")]
    Expand {
        title: String,
        #[source]
        source: SourceError,
    },
}

/// The pipeline's successful output
#[derive(Debug, Clone)]
pub struct ReferenceList {
    /// Profile display name, for reporting
    pub author: String,

    /// Style the rows were formatted in
    pub style: CitationStyle,

    /// Formatted rows, most recent publication first
    pub rows: Vec<ReferenceRow>,
}

impl ReferenceList {
    /// Whether no publication survived selection
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of formatted references
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Run the full pipeline against a profile source.
///
/// The listing is over-fetched by `fetch.overfetch_factor` (0 expands the
/// whole listing) so that entries dropped by the year filter still leave
/// enough candidates; selection then applies the hard sort-and-truncate
/// contract.
pub async fn generate_references(
    source: &dyn ProfileSource,
    request: &ExportRequest,
    fetch: &FetchConfig,
) -> Result<ReferenceList, PipelineError> {
    let user_id = extract_user_id(&request.profile_url)?;

    tracing::info!("looking up profile {} via {}", user_id, source.name());
    let profile = source
        .lookup_profile(&user_id)
        .await
        .map_err(PipelineError::Lookup)?;

    let candidate_limit = if fetch.overfetch_factor == 0 {
        profile.publications.len()
    } else {
        request.count.saturating_mul(fetch.overfetch_factor)
    };

    let mut candidates: Vec<Publication> = Vec::new();
    for stub in profile.publications.iter().take(candidate_limit) {
        let publication = source
            .expand(stub)
            .await
            .map_err(|err| PipelineError::Expand {
                title: stub.title.clone(),
                source: err,
            })?;
        candidates.push(publication);
    }

    let selected = select_recent(candidates, request.count);
    tracing::info!(
        "selected {} of {} listed publications",
        selected.len(),
        profile.publication_count()
    );

    let rows = selected
        .iter()
        .map(|p| ReferenceRow::new(format_reference(p, request.style)))
        .collect();

    Ok(ReferenceList {
        author: profile.name,
        style: request.style,
        rows,
    })
}
