//! Google Scholar profile source implementation.
//!
//! Google Scholar has no official public API; this source scrapes the
//! public profile page and the per-publication citation view. Requests go
//! through the shared rate-limited [`HttpClient`] and the retry helper, and
//! the scrape stays within the public, unauthenticated pages.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::FetchConfig;
use crate::models::{AuthorProfile, Publication, PublicationBuilder, PublicationStub};
use crate::sources::{ProfileSource, SourceError};
use crate::utils::{scrape_retry_config, with_retry, HttpClient};

const SCHOLAR_BASE_URL: &str = "https://scholar.google.com";

/// Scholar blocks the default library user agent outright
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Google Scholar profile source
#[derive(Debug, Clone)]
pub struct GoogleScholarSource {
    client: Arc<HttpClient>,
    base_url: String,
    page_size: usize,
}

impl GoogleScholarSource {
    /// Create a source with default fetch settings
    pub fn new() -> Result<Self, SourceError> {
        Self::with_config(&FetchConfig::default())
    }

    /// Create a source from retrieval configuration
    pub fn with_config(fetch: &FetchConfig) -> Result<Self, SourceError> {
        let client = HttpClient::with_rate(
            fetch.requests_per_second,
            Duration::from_secs(fetch.request_timeout_secs),
        )?;

        Ok(Self {
            client: Arc::new(client),
            base_url: SCHOLAR_BASE_URL.to_string(),
            page_size: fetch.page_size.max(1),
        })
    }

    /// Point the source at a different host (self-hosted mirrors, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn profile_url(&self, user_id: &str, start: usize) -> Result<String, SourceError> {
        let cstart = start.to_string();
        let pagesize = self.page_size.to_string();

        let url = Url::parse_with_params(
            &format!("{}/citations", self.base_url),
            &[
                ("hl", "en"),
                ("user", user_id),
                ("view_op", "list_works"),
                ("sortby", "pubdate"),
                ("cstart", cstart.as_str()),
                ("pagesize", pagesize.as_str()),
            ],
        )
        .map_err(|e| SourceError::InvalidRequest(format!("bad profile URL: {}", e)))?;

        Ok(url.into())
    }

    fn citation_view_url(&self, citation_id: &str) -> String {
        format!(
            "{}/citations?view_op=view_citation&hl=en&citation_for_view={}",
            self.base_url,
            urlencoding::encode(citation_id)
        )
    }

    async fn fetch_page(&self, url: &str) -> Result<String, SourceError> {
        let client = Arc::clone(&self.client);
        let url_for_retry = url.to_string();

        with_retry(scrape_retry_config(), || {
            let client = Arc::clone(&client);
            let url = url_for_retry.clone();
            async move {
                let response = client
                    .get(&url)
                    .header("User-Agent", BROWSER_USER_AGENT)
                    .header("Accept", "text/html")
                    .send()
                    .await
                    .map_err(|e| {
                        SourceError::Network(format!("request to Google Scholar failed: {}", e))
                    })?;

                let status = response.status();
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    return Err(SourceError::RateLimit);
                }
                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(SourceError::NotFound(url.clone()));
                }
                if !status.is_success() {
                    return Err(SourceError::Api(format!(
                        "Google Scholar returned status: {}",
                        status
                    )));
                }

                response
                    .text()
                    .await
                    .map_err(|e| SourceError::Parse(format!("failed to read response body: {}", e)))
            }
        })
        .await
    }

    /// Parse one profile listing page
    fn parse_profile_page(&self, html: &str, user_id: &str) -> Result<ProfilePage, SourceError> {
        let document = Html::parse_document(html);

        let name_selector = selector("#gsc_prf_in")?;
        let name = document
            .select(&name_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| SourceError::NotFound(format!("profile not found: {}", user_id)))?;

        let affiliation_selector = selector(".gsc_prf_il")?;
        let affiliation = document
            .select(&affiliation_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|a| !a.is_empty());

        let row_selector = selector("tr.gsc_a_tr")?;
        let stubs: Vec<PublicationStub> = document
            .select(&row_selector)
            .filter_map(|row| self.parse_listing_row(&row))
            .collect();

        Ok(ProfilePage {
            name,
            affiliation,
            stubs,
        })
    }

    /// Parse one row of the publication listing table
    fn parse_listing_row(&self, row: &ElementRef) -> Option<PublicationStub> {
        let title_selector = Selector::parse("td.gsc_a_t a.gsc_a_at").ok()?;
        let title_elem = row.select(&title_selector).next()?;

        let title = title_elem.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            return None;
        }

        let mut stub = PublicationStub::new(title);

        if let Some(href) = title_elem.value().attr("href") {
            if let Some(id) = extract_citation_id(href) {
                stub = stub.citation_id(id);
            }
        }

        let year_selector = Selector::parse("td.gsc_a_y span").ok()?;
        let year = row
            .select(&year_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|y| !y.is_empty());
        if let Some(year) = year {
            stub = stub.year(year);
        }

        Some(stub)
    }

    /// Parse the citation view page into a full record
    fn parse_citation_view(
        &self,
        html: &str,
        stub: &PublicationStub,
        view_url: &str,
    ) -> Result<Publication, SourceError> {
        let document = Html::parse_document(html);

        let table_selector = selector("#gsc_oci_table")?;
        if document.select(&table_selector).next().is_none() {
            return Err(SourceError::Parse(format!(
                "citation view for \"{}\" has no detail table",
                stub.title
            )));
        }

        let title_selector = selector("#gsc_oci_title")?;
        let title = document
            .select(&title_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| stub.title.clone());

        let mut builder = PublicationBuilder::new().title(title).url(view_url);
        if let Some(year) = &stub.year {
            builder = builder.pub_year(year.clone());
        }

        let field_row_selector = selector("#gsc_oci_table div.gs_scl")?;
        let field_selector = selector(".gsc_oci_field")?;
        let value_selector = selector(".gsc_oci_value")?;

        for row in document.select(&field_row_selector) {
            let Some(field) = row.select(&field_selector).next() else {
                continue;
            };
            let Some(value) = row.select(&value_selector).next() else {
                continue;
            };

            let field = field.text().collect::<String>().trim().to_lowercase();
            let value = value.text().collect::<String>().trim().to_string();
            if value.is_empty() {
                continue;
            }

            match field.as_str() {
                "authors" | "inventors" => builder = builder.author(value),
                // "2020/5/12" - the leading segment is the year
                "publication date" => {
                    let year = value.split('/').next().unwrap_or(&value).trim().to_string();
                    builder = builder.pub_year(year);
                }
                "journal" | "source" | "book" | "conference" => builder = builder.journal(value),
                "volume" => builder = builder.volume(value),
                "pages" => builder = builder.pages(value),
                "total citations" => {
                    if let Some(count) = parse_citation_count(&value) {
                        builder = builder.citations(count);
                    }
                }
                _ => {}
            }
        }

        Ok(builder.build())
    }
}

#[async_trait]
impl ProfileSource for GoogleScholarSource {
    fn id(&self) -> &str {
        "google_scholar"
    }

    fn name(&self) -> &str {
        "Google Scholar"
    }

    async fn lookup_profile(&self, user_id: &str) -> Result<AuthorProfile, SourceError> {
        if user_id.trim().is_empty() {
            return Err(SourceError::InvalidRequest("empty profile id".to_string()));
        }

        let mut profile = AuthorProfile::new(user_id, "");
        let mut start = 0;

        loop {
            let url = self.profile_url(user_id, start)?;
            tracing::debug!("fetching profile listing page at offset {}", start);

            let html = self.fetch_page(&url).await?;
            let page = self.parse_profile_page(&html, user_id)?;

            if start == 0 {
                profile.name = page.name;
                profile.affiliation = page.affiliation;
            }

            let fetched = page.stubs.len();
            profile.publications.extend(page.stubs);

            // A short page is the last one
            if fetched < self.page_size {
                break;
            }
            start += self.page_size;
        }

        tracing::info!(
            "profile {} lists {} publications",
            user_id,
            profile.publication_count()
        );
        Ok(profile)
    }

    async fn expand(&self, stub: &PublicationStub) -> Result<Publication, SourceError> {
        let Some(citation_id) = &stub.citation_id else {
            // Nothing to expand; carry over what the listing had
            tracing::debug!("no citation view for \"{}\", using listing fields", stub.title);
            let mut builder = PublicationBuilder::new().title(stub.title.clone());
            if let Some(year) = &stub.year {
                builder = builder.pub_year(year.clone());
            }
            return Ok(builder.build());
        };

        let url = self.citation_view_url(citation_id);
        let html = self.fetch_page(&url).await?;
        self.parse_citation_view(&html, stub, &url)
    }
}

struct ProfilePage {
    name: String,
    affiliation: Option<String>,
    stubs: Vec<PublicationStub>,
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Parse(format!("invalid selector '{}': {}", css, e)))
}

/// Pull the citation-view id out of a listing link
fn extract_citation_id(href: &str) -> Option<String> {
    let re = regex::Regex::new(r"citation_for_view=([^&]+)").ok()?;
    re.captures(href)?.get(1).map(|m| m.as_str().to_string())
}

/// "Cited by 123" or a bare count
fn parse_citation_count(value: &str) -> Option<u32> {
    let re = regex::Regex::new(r"(\d+)").ok()?;
    re.captures(value)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_HTML: &str = r#"
<html><body>
  <div id="gsc_prf_in">Ada Lovelace</div>
  <div class="gsc_prf_il">Analytical Engines Institute</div>
  <table><tbody id="gsc_a_b">
    <tr class="gsc_a_tr">
      <td class="gsc_a_t">
        <a class="gsc_a_at" href="/citations?view_op=view_citation&amp;hl=en&amp;user=a1&amp;citation_for_view=a1:AAA">Notes on the Engine</a>
      </td>
      <td class="gsc_a_c"><a class="gsc_a_ac">120</a></td>
      <td class="gsc_a_y"><span class="gsc_a_h">1843</span></td>
    </tr>
    <tr class="gsc_a_tr">
      <td class="gsc_a_t">
        <a class="gsc_a_at" href="/citations?view_op=view_citation&amp;hl=en&amp;user=a1&amp;citation_for_view=a1:BBB">Sketch of a Program</a>
      </td>
      <td class="gsc_a_c"><a class="gsc_a_ac"></a></td>
      <td class="gsc_a_y"><span class="gsc_a_h"></span></td>
    </tr>
  </tbody></table>
</body></html>
"#;

    const CITATION_HTML: &str = r#"
<html><body>
  <a id="gsc_oci_title">Notes on the Engine</a>
  <div id="gsc_oci_table">
    <div class="gs_scl">
      <div class="gsc_oci_field">Authors</div>
      <div class="gsc_oci_value">Lovelace, A.</div>
    </div>
    <div class="gs_scl">
      <div class="gsc_oci_field">Publication date</div>
      <div class="gsc_oci_value">1843/9/1</div>
    </div>
    <div class="gs_scl">
      <div class="gsc_oci_field">Journal</div>
      <div class="gsc_oci_value">Scientific Memoirs</div>
    </div>
    <div class="gs_scl">
      <div class="gsc_oci_field">Volume</div>
      <div class="gsc_oci_value">3</div>
    </div>
    <div class="gs_scl">
      <div class="gsc_oci_field">Pages</div>
      <div class="gsc_oci_value">666-731</div>
    </div>
    <div class="gs_scl">
      <div class="gsc_oci_field">Total citations</div>
      <div class="gsc_oci_value">Cited by 120</div>
    </div>
  </div>
</body></html>
"#;

    fn source() -> GoogleScholarSource {
        GoogleScholarSource::new().unwrap()
    }

    #[test]
    fn test_parse_profile_page() {
        let page = source().parse_profile_page(PROFILE_HTML, "a1").unwrap();

        assert_eq!(page.name, "Ada Lovelace");
        assert_eq!(
            page.affiliation,
            Some("Analytical Engines Institute".to_string())
        );
        assert_eq!(page.stubs.len(), 2);

        assert_eq!(page.stubs[0].title, "Notes on the Engine");
        assert_eq!(page.stubs[0].year, Some("1843".to_string()));
        assert_eq!(page.stubs[0].citation_id, Some("a1:AAA".to_string()));

        // Empty year column stays None
        assert_eq!(page.stubs[1].year, None);
    }

    #[test]
    fn test_parse_profile_page_missing_name_is_not_found() {
        let result = source().parse_profile_page("<html><body></body></html>", "nobody");
        assert!(matches!(result, Err(SourceError::NotFound(_))));
    }

    #[test]
    fn test_parse_citation_view() {
        let stub = PublicationStub::new("Notes on the Engine").citation_id("a1:AAA");
        let publication = source()
            .parse_citation_view(CITATION_HTML, &stub, "http://example.com/view")
            .unwrap();

        assert_eq!(publication.author, Some("Lovelace, A.".to_string()));
        assert_eq!(publication.pub_year, Some("1843".to_string()));
        assert_eq!(publication.journal, Some("Scientific Memoirs".to_string()));
        assert_eq!(publication.volume, Some("3".to_string()));
        assert_eq!(publication.pages, Some("666-731".to_string()));
        assert_eq!(publication.citations, Some(120));
        assert_eq!(publication.url, Some("http://example.com/view".to_string()));
    }

    #[test]
    fn test_parse_citation_view_without_table_is_parse_error() {
        let stub = PublicationStub::new("Ghost");
        let result = source().parse_citation_view("<html></html>", &stub, "http://x");
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_extract_citation_id() {
        let href = "/citations?view_op=view_citation&hl=en&user=a1&citation_for_view=a1:XYZ_9";
        assert_eq!(extract_citation_id(href), Some("a1:XYZ_9".to_string()));
        assert_eq!(extract_citation_id("/citations?hl=en"), None);
    }

    #[test]
    fn test_parse_citation_count() {
        assert_eq!(parse_citation_count("Cited by 120"), Some(120));
        assert_eq!(parse_citation_count("7"), Some(7));
        assert_eq!(parse_citation_count("none"), None);
    }

    #[tokio::test]
    async fn test_expand_without_citation_id_uses_listing_fields() {
        let stub = PublicationStub::new("Unlinked Work").year("2001");
        let publication = source().expand(&stub).await.unwrap();

        assert_eq!(publication.title, Some("Unlinked Work".to_string()));
        assert_eq!(publication.pub_year, Some("2001".to_string()));
        assert_eq!(publication.author, None);
    }

    #[tokio::test]
    async fn test_lookup_profile_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/citations")
            .match_query(mockito::Matcher::UrlEncoded("user".into(), "a1".into()))
            .with_status(200)
            .with_body(PROFILE_HTML)
            .create_async()
            .await;

        let fetch = FetchConfig {
            requests_per_second: 100.0,
            ..FetchConfig::default()
        };
        let source = GoogleScholarSource::with_config(&fetch)
            .unwrap()
            .with_base_url(server.url());

        let profile = source.lookup_profile("a1").await.unwrap();
        mock.assert_async().await;

        assert_eq!(profile.name, "Ada Lovelace");
        assert_eq!(profile.publication_count(), 2);
    }

    #[tokio::test]
    async fn test_lookup_profile_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let fetch = FetchConfig {
            requests_per_second: 100.0,
            ..FetchConfig::default()
        };
        let source = GoogleScholarSource::with_config(&fetch)
            .unwrap()
            .with_base_url(server.url());

        let result = source.lookup_profile("nobody").await;
        assert!(matches!(result, Err(SourceError::NotFound(_))));
    }
}
