//! Offline fetcher that replays captured responses.
//!
//! Useful for exercising the search and release components against saved
//! pages without touching the network. Responses are keyed by URL without
//! its query string; every request is recorded so callers can inspect what
//! was asked for.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;
use crate::fetch::{Document, DocumentFetcher, JsonFetcher};

/// A request seen by a [`ReplayFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

/// In-memory [`DocumentFetcher`] and [`JsonFetcher`].
///
/// Unknown URLs answer with a 404 [`FetchError::Status`].
#[derive(Debug, Default)]
pub struct ReplayFetcher {
    documents: HashMap<String, String>,
    json: HashMap<String, Value>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ReplayFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` as the HTML document at `url`.
    #[must_use]
    pub fn with_document(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.documents.insert(url.into(), body.into());
        self
    }

    /// Serve `value` as the JSON document at `url`.
    #[must_use]
    pub fn with_json(mut self, url: impl Into<String>, value: Value) -> Self {
        self.json.insert(url.into(), value);
        self
    }

    /// Every request made so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, url: &str, query: &[(&str, &str)], headers: &[(&str, &str)]) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                url: url.to_string(),
                query: owned_pairs(query),
                headers: owned_pairs(headers),
            });
    }
}

fn owned_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn not_found(url: &str) -> FetchError {
    FetchError::Status {
        url: url.to_string(),
        status: 404,
    }
}

#[async_trait]
impl DocumentFetcher for ReplayFetcher {
    async fn fetch_document(
        &self,
        url: &str,
        query: &[(&str, &str)],
        _follow_redirects: bool,
    ) -> Result<Document, FetchError> {
        self.record(url, query, &[]);
        self.documents
            .get(url)
            .map(|body| Document::new(url, body.as_str()))
            .ok_or_else(|| not_found(url))
    }
}

#[async_trait]
impl JsonFetcher for ReplayFetcher {
    async fn fetch_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Value, FetchError> {
        self.record(url, query, headers);
        self.json.get(url).cloned().ok_or_else(|| not_found(url))
    }
}
