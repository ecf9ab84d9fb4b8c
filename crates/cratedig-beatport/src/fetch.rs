//! Fetcher capabilities and their reqwest implementation.
//!
//! The search and release components never talk to the network directly.
//! They receive a [`DocumentFetcher`] and a [`JsonFetcher`], which keeps
//! them testable against canned responses and lets callers own transport
//! policy (timeouts, proxies, user agent).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::FetchError;

/// A fetched HTML page.
///
/// The body is kept as text and parsed on lookup, so a `Document` can be
/// held across await points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    url: String,
    body: String,
}

impl Document {
    #[must_use]
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }

    /// The URL the document was finally served from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text content of the first `<tag id="id">` element, if any.
    pub fn element_text(&self, tag: &str, id: &str) -> Option<String> {
        let selector = Selector::parse(&format!("{tag}#{id}")).ok()?;
        let html = Html::parse_document(&self.body);
        html.select(&selector)
            .next()
            .map(|element| element.text().collect())
    }
}

/// Fetches HTML pages.
#[async_trait]
pub trait DocumentFetcher: fmt::Debug + Send + Sync {
    async fn fetch_document(
        &self,
        url: &str,
        query: &[(&str, &str)],
        follow_redirects: bool,
    ) -> Result<Document, FetchError>;
}

/// Fetches and decodes JSON documents.
#[async_trait]
pub trait JsonFetcher: fmt::Debug + Send + Sync {
    async fn fetch_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Value, FetchError>;
}

/// reqwest-backed implementation of both fetcher traits.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    http_no_redirect: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given user agent and per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP clients cannot be created.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        let http_no_redirect = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            http,
            http_no_redirect,
        })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch_document(
        &self,
        url: &str,
        query: &[(&str, &str)],
        follow_redirects: bool,
    ) -> Result<Document, FetchError> {
        let client = if follow_redirects {
            &self.http
        } else {
            &self.http_no_redirect
        };

        log::debug!("Fetching document {}", url);
        let response = ensure_success(client.get(url).query(query).send().await?)?;
        let final_url = response.url().to_string();
        let body = response.text().await?;

        Ok(Document::new(final_url, body))
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Value, FetchError> {
        let mut request = self.http.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        log::debug!("Fetching JSON {}", url);
        let response = ensure_success(request.send().await?)?;
        Ok(response.json().await?)
    }
}

fn ensure_success(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status {
            url: response.url().to_string(),
            status: status.as_u16(),
        })
    }
}
