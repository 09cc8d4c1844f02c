//! Mock profile source for testing purposes.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{AuthorProfile, Publication, PublicationBuilder, PublicationStub};
use crate::sources::{ProfileSource, SourceError};

/// A mock source returning canned profiles and records.
#[derive(Debug, Default)]
pub struct MockProfileSource {
    profile: Mutex<Option<AuthorProfile>>,
    records: Mutex<HashMap<String, Publication>>,
    lookup_failure: Mutex<Option<String>>,
    expand_failures: Mutex<HashSet<String>>,
    expand_calls: AtomicUsize,
}

impl MockProfileSource {
    /// Create a mock with no canned data
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the profile returned by `lookup_profile`
    pub fn set_profile(&self, profile: AuthorProfile) {
        *self.profile.lock().unwrap() = Some(profile);
    }

    /// Set the full record returned when expanding the stub with this title
    pub fn set_record(&self, title: &str, publication: Publication) {
        self.records
            .lock()
            .unwrap()
            .insert(title.to_string(), publication);
    }

    /// Make `lookup_profile` fail with an API error
    pub fn fail_lookup(&self, message: &str) {
        *self.lookup_failure.lock().unwrap() = Some(message.to_string());
    }

    /// Make expansion of the stub with this title fail
    pub fn fail_expand(&self, title: &str) {
        self.expand_failures
            .lock()
            .unwrap()
            .insert(title.to_string());
    }

    /// Number of `expand` calls made so far
    pub fn expand_calls(&self) -> usize {
        self.expand_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileSource for MockProfileSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn lookup_profile(&self, user_id: &str) -> Result<AuthorProfile, SourceError> {
        if let Some(message) = &*self.lookup_failure.lock().unwrap() {
            return Err(SourceError::Api(message.clone()));
        }

        match &*self.profile.lock().unwrap() {
            Some(profile) => Ok(profile.clone()),
            None => Err(SourceError::NotFound(user_id.to_string())),
        }
    }

    async fn expand(&self, stub: &PublicationStub) -> Result<Publication, SourceError> {
        self.expand_calls.fetch_add(1, Ordering::SeqCst);

        if self.expand_failures.lock().unwrap().contains(&stub.title) {
            return Err(SourceError::Network(format!(
                "connection reset while expanding \"{}\"",
                stub.title
            )));
        }

        if let Some(record) = self.records.lock().unwrap().get(&stub.title) {
            return Ok(record.clone());
        }

        // No canned record: echo the stub fields back
        let mut builder = PublicationBuilder::new().title(stub.title.clone());
        if let Some(year) = &stub.year {
            builder = builder.pub_year(year.clone());
        }
        Ok(builder.build())
    }
}

/// Helper to build a canned profile from (title, year) pairs
pub fn profile_with_publications(
    user_id: &str,
    name: &str,
    entries: &[(&str, Option<&str>)],
) -> AuthorProfile {
    let mut profile = AuthorProfile::new(user_id, name);
    for (title, year) in entries {
        let mut stub = PublicationStub::new(*title);
        if let Some(year) = year {
            stub = stub.year(*year);
        }
        profile.publications.push(stub);
    }
    profile
}
