//! Integration tests for the reference export pipeline.
//!
//! These drive the full pipeline against the mock profile source and the
//! spreadsheet writer, without any network I/O.

use scholar_refs::cite::CitationStyle;
use scholar_refs::config::FetchConfig;
use scholar_refs::export::{default_filename, write_workbook};
use scholar_refs::models::PublicationBuilder;
use scholar_refs::pipeline::{generate_references, ExportRequest, PipelineError};
use scholar_refs::sources::mock::{profile_with_publications, MockProfileSource};
use scholar_refs::sources::ProfileSource;

fn canned_source() -> MockProfileSource {
    let source = MockProfileSource::new();
    source.set_profile(profile_with_publications(
        "test-user",
        "J. Smith",
        &[
            ("Graphs", Some("2020")),
            ("Trees", Some("2018")),
            ("Forthcoming ideas", None),
            ("Lattices", Some("2022")),
        ],
    ));
    source.set_record(
        "Graphs",
        PublicationBuilder::new()
            .author("Smith, J.")
            .title("Graphs")
            .pub_year("2020")
            .journal("J. CS")
            .build(),
    );
    source.set_record(
        "Lattices",
        PublicationBuilder::new()
            .author("Smith, J.")
            .title("Lattices")
            .pub_year("2022")
            .journal("Order")
            .volume("39")
            .pages("1-20")
            .build(),
    );
    source
}

fn request(count: usize, style: CitationStyle) -> ExportRequest {
    ExportRequest::new(
        "https://scholar.google.com/citations?user=test-user&hl=en",
        count,
        style,
    )
}

#[tokio::test]
async fn test_end_to_end_apa_export() {
    let source = canned_source();

    let list = generate_references(&source, &request(2, CitationStyle::Apa), &FetchConfig::default())
        .await
        .unwrap();

    assert_eq!(list.author, "J. Smith");
    assert_eq!(list.len(), 2);
    // Most recent first; the undated entry never shows up
    assert_eq!(list.rows[0].reference, "Smith, J. (2022). Lattices. Order.");
    assert_eq!(list.rows[1].reference, "Smith, J. (2020). Graphs. J. CS.");
}

#[tokio::test]
async fn test_end_to_end_vancouver_export() {
    let source = canned_source();

    let list = generate_references(
        &source,
        &request(1, CitationStyle::Vancouver),
        &FetchConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(list.rows[0].reference, "Smith, J.. Lattices. Order. 2022;39:1-20");
}

#[tokio::test]
async fn test_unknown_style_name_behaves_like_apa() {
    let source = canned_source();
    let style = CitationStyle::from_name("IEEE");

    let list = generate_references(&source, &request(1, style), &FetchConfig::default())
        .await
        .unwrap();

    assert_eq!(list.rows[0].reference, "Smith, J. (2022). Lattices. Order.");
}

#[tokio::test]
async fn test_workbook_written_from_pipeline_output() {
    let source = canned_source();
    let list = generate_references(&source, &request(3, CitationStyle::Mla), &FetchConfig::default())
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(default_filename(list.style));
    write_workbook(&path, &list.rows).unwrap();

    assert!(path.ends_with("Scholar_References_MLA.xlsx"));
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[tokio::test]
async fn test_bad_url_reports_input_error_without_retrieval() {
    let source = MockProfileSource::new();
    source.fail_lookup("must not be called");

    let bad = ExportRequest::new("not a profile url", 5, CitationStyle::Apa);
    let result = generate_references(&source, &bad, &FetchConfig::default()).await;

    assert!(matches!(result, Err(PipelineError::InvalidProfileUrl(_))));
}

#[tokio::test]
async fn test_lookup_failure_carries_cause() {
    let source = MockProfileSource::new();
    source.fail_lookup("profile service exploded");

    let result = generate_references(&source, &request(5, CitationStyle::Apa), &FetchConfig::default()).await;

    let err = result.unwrap_err();
    let message = format!("{}", err);
    assert!(message.contains("profile lookup failed"));

    // The underlying source error stays reachable for callers that want it
    let cause = std::error::Error::source(&err).map(|c| c.to_string());
    assert_eq!(cause, Some("API error: profile service exploded".to_string()));
}

#[tokio::test]
async fn test_empty_outcome_is_distinct_from_failure() {
    let source = MockProfileSource::new();
    source.set_profile(profile_with_publications(
        "test-user",
        "Quiet Author",
        &[("Only a draft", None)],
    ));

    let list = generate_references(&source, &request(5, CitationStyle::Apa), &FetchConfig::default())
        .await
        .unwrap();

    assert!(list.is_empty());
    assert_eq!(list.author, "Quiet Author");
}

#[tokio::test]
async fn test_mock_source_metadata() {
    let source = MockProfileSource::new();
    assert_eq!(source.id(), "mock");
    assert_eq!(source.name(), "Mock Source");
}
