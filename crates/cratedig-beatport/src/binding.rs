//! Beatport site and API constants.
//!
//! [`BeatportBinding`] is a passive value object: it knows the base URLs,
//! the embedded-state marker, and how to recognize and build release URLs,
//! but performs no I/O.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScrapeError;

const SITE_URL: &str = "https://www.beatport.com";
const API_URL: &str = "https://api.beatport.com";

/// Human-readable source label reported with search results.
pub const SOURCE_NAME: &str = "Beatport";

/// Tag of the element carrying the embedded page state.
pub const STATE_TAG: &str = "script";

/// Id of the element carrying the embedded page state.
pub const STATE_ID: &str = "__NEXT_DATA__";

/// Number of tracks requested from the tracks endpoint.
pub const TRACKS_PAGE_SIZE: u32 = 100;

#[allow(clippy::expect_used)]
static RELEASE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:(?:www|classic)\.)?beatport\.com/release/.+?/(\d+)/?$")
        .expect("release URL pattern is valid")
});

/// Extract the numeric release id from a canonical Beatport release URL.
///
/// Returns `None` for anything that is not a Beatport release URL.
pub fn parse_release_url(url: &str) -> Option<u64> {
    RELEASE_URL
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Base URLs for the Beatport site and API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatportBinding {
    site_url: String,
    api_url: String,
}

impl Default for BeatportBinding {
    fn default() -> Self {
        Self::with_bases(SITE_URL, API_URL)
    }
}

impl BeatportBinding {
    /// Point the binding at alternative site and API hosts.
    #[must_use]
    pub fn with_bases(site_url: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into().trim_end_matches('/').to_string(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// The HTML search page for releases.
    pub fn search_url(&self) -> String {
        format!("{}/search/releases", self.site_url)
    }

    /// The internal JSON search endpoint for a given build identifier.
    pub fn search_data_url(&self, build_id: &str) -> String {
        format!(
            "{}/_next/data/{build_id}/en/search/releases.json",
            self.site_url
        )
    }

    /// The release page for a release id.
    pub fn release_url(&self, release_id: u64) -> String {
        format!("{}/release/-/{release_id}", self.site_url)
    }

    /// The paginated tracks endpoint for a release id.
    pub fn release_tracks_url(&self, release_id: u64) -> String {
        format!("{}/v4/catalog/releases/{release_id}/tracks/", self.api_url)
    }

    /// Turn a release URL or bare numeric id into the page URL to fetch.
    ///
    /// Recognized release URLs are fetched as given.
    pub fn resolve_release(&self, id_or_url: &str) -> Result<String, ScrapeError> {
        let input = id_or_url.trim();
        if parse_release_url(input).is_some() {
            return Ok(input.to_string());
        }
        input
            .parse::<u64>()
            .map(|id| self.release_url(id))
            .map_err(|_| ScrapeError::UnrecognizedRelease {
                input: input.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_url_variants() {
        assert_eq!(
            parse_release_url("https://www.beatport.com/release/test-ep/1234567"),
            Some(1_234_567)
        );
        assert_eq!(
            parse_release_url("http://beatport.com/release/test-ep/42/"),
            Some(42)
        );
        assert_eq!(
            parse_release_url("https://classic.beatport.com/release/a/b/c/99"),
            Some(99)
        );
    }

    #[test]
    fn test_parse_release_url_rejects_other_urls() {
        assert_eq!(parse_release_url("https://www.beatport.com/track/x/1"), None);
        assert_eq!(parse_release_url("https://www.beatport.com/release/x/"), None);
        assert_eq!(parse_release_url("https://example.com/release/x/1"), None);
        assert_eq!(parse_release_url("1234"), None);
    }

    #[test]
    fn test_default_urls() {
        let binding = BeatportBinding::default();
        assert_eq!(binding.search_url(), "https://www.beatport.com/search/releases");
        assert_eq!(
            binding.search_data_url("abc123"),
            "https://www.beatport.com/_next/data/abc123/en/search/releases.json"
        );
        assert_eq!(
            binding.release_tracks_url(7),
            "https://api.beatport.com/v4/catalog/releases/7/tracks/"
        );
    }

    #[test]
    fn test_with_bases_trims_trailing_slash() {
        let binding = BeatportBinding::with_bases("http://site.test/", "http://api.test/");
        assert_eq!(binding.release_url(5), "http://site.test/release/-/5");
        assert_eq!(binding.api_url(), "http://api.test");
    }

    #[test]
    fn test_resolve_release() {
        let binding = BeatportBinding::default();
        let url = "https://www.beatport.com/release/test-ep/1234";
        assert_eq!(binding.resolve_release(url).unwrap(), url);
        assert_eq!(
            binding.resolve_release(" 1234 ").unwrap(),
            "https://www.beatport.com/release/-/1234"
        );
        assert!(matches!(
            binding.resolve_release("not a release"),
            Err(ScrapeError::UnrecognizedRelease { .. })
        ));
    }
}
