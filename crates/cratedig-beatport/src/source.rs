//! The Beatport source facade.

use std::sync::Arc;

use cratedig_core::{PlainFormatter, ReleaseRecord, ResultFormatter, SearchResults};

use crate::binding::{parse_release_url, BeatportBinding, SOURCE_NAME};
use crate::config::Config;
use crate::error::Result;
use crate::fetch::{DocumentFetcher, HttpFetcher, JsonFetcher};
use crate::release::ReleaseExtractor;
use crate::search::Searcher;

/// Search and release extraction against Beatport.
#[derive(Debug, Clone)]
pub struct BeatportSource {
    searcher: Searcher,
    extractor: ReleaseExtractor,
}

impl BeatportSource {
    /// Create a source talking to beatport.com over HTTP.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.user_agent, config.request_timeout())?;
        Ok(Self::with_fetchers(
            BeatportBinding::default(),
            Arc::new(fetcher.clone()),
            Arc::new(fetcher),
            config,
        ))
    }

    /// Create a source over caller-supplied fetchers.
    pub fn with_fetchers(
        binding: BeatportBinding,
        documents: Arc<dyn DocumentFetcher>,
        json: Arc<dyn JsonFetcher>,
        config: Config,
    ) -> Self {
        Self::with_formatter(binding, documents, json, config, Arc::new(PlainFormatter))
    }

    /// Create a source over caller-supplied fetchers and result formatter.
    pub fn with_formatter(
        binding: BeatportBinding,
        documents: Arc<dyn DocumentFetcher>,
        json: Arc<dyn JsonFetcher>,
        config: Config,
        formatter: Arc<dyn ResultFormatter>,
    ) -> Self {
        let searcher = Searcher::new(
            binding.clone(),
            Arc::clone(&documents),
            Arc::clone(&json),
            formatter,
            Arc::new(config),
        );
        let extractor = ReleaseExtractor::new(binding, documents, json);
        Self {
            searcher,
            extractor,
        }
    }

    /// Search releases. See [`Searcher::search`].
    pub async fn search(&self, query: &str, limit: usize) -> Result<(&'static str, SearchResults)> {
        self.searcher.search(query, limit).await
    }

    /// Fetch a full release. See [`ReleaseExtractor::fetch_release`].
    pub async fn fetch_release(&self, id_or_url: &str) -> Result<ReleaseRecord> {
        self.extractor.fetch_release(id_or_url).await
    }

    /// Whether `url` is a Beatport release URL this source can fetch.
    pub fn matches_url(&self, url: &str) -> bool {
        parse_release_url(url).is_some()
    }

    pub fn source_name(&self) -> &'static str {
        SOURCE_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_source() {
        let source = BeatportSource::new(Config::default()).unwrap();
        assert_eq!(source.source_name(), "Beatport");
    }

    #[test]
    fn test_matches_url() {
        let source = BeatportSource::new(Config::default()).unwrap();
        assert!(source.matches_url("https://www.beatport.com/release/test-ep/1234"));
        assert!(!source.matches_url("https://www.discogs.com/release/1234"));
        assert!(!source.matches_url("1234"));
    }
}
