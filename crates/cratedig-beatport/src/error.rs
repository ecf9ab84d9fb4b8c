//! Error types for the Beatport source.
//!
//! Scrape failures are classified in [`ScrapeError`] and always carry the
//! low-level cause as their `source()`. Transport failures from the fetchers
//! are a separate [`FetchError`] and are passed through untouched.

use thiserror::Error;

use crate::json::ShapeError;

/// A classified failure while extracting data from Beatport responses.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The input was neither a Beatport release URL nor a numeric id.
    #[error("could not resolve a Beatport release from `{input}`")]
    UnrecognizedRelease { input: String },

    /// The page had no embedded state script.
    #[error("could not find embedded page state at {url}")]
    MissingEmbeddedState { url: String },

    /// The embedded state script was not valid JSON.
    #[error("could not decode embedded page state at {url}: {source}")]
    InvalidEmbeddedState {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The search page state had no build identifier.
    #[error("could not find buildId: {0}")]
    MissingBuildIdentifier(#[source] ShapeError),

    /// The search data document lacked the results list.
    #[error("could not find search results: {0}")]
    MissingSearchResults(#[source] ShapeError),

    /// A single search result was missing a field or had the wrong shape.
    #[error("failed to parse scraped search result {position}: {source}")]
    MalformedSearchResult {
        position: usize,
        #[source]
        source: ShapeError,
    },

    /// The release page state had no release object.
    #[error("could not find release data: {0}")]
    MissingReleaseData(#[source] ShapeError),

    /// The release object was present but unusable.
    #[error("invalid release data: {reason}")]
    InvalidReleaseData { reason: String },

    /// The release page state had no anonymous API token.
    #[error("could not find API token: {0}")]
    MissingApiToken(#[source] ShapeError),

    /// The tracks response lacked its paging envelope.
    #[error("could not parse track page: {0}")]
    InvalidTrackPage(#[source] ShapeError),

    /// The release has more tracks than fit on the first page.
    #[error("only the first {page_size} tracks could be fetched (page {page})")]
    IncompletePagination { page: String, page_size: u32 },

    /// A track carried a genre missing from the canonical table.
    #[error("unknown genre `{genre}`")]
    UnknownGenre { genre: String },

    /// A track was missing a required field.
    #[error("could not parse track {track_number}: {source}")]
    MissingTrackField {
        track_number: usize,
        #[source]
        source: ShapeError,
    },

    /// A release-level field was missing or mistyped.
    #[error("could not parse release {field}: {source}")]
    MissingReleaseField {
        field: &'static str,
        #[source]
        source: ShapeError,
    },

    /// The publish date did not start with an integer year.
    #[error("could not parse release year from `{publish_date}`: {source}")]
    InvalidReleaseDate {
        publish_date: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// A transport-level failure from a fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
}

/// Errors returned by the Beatport source.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl Error {
    /// The classified scrape failure, if this is one.
    pub fn as_scrape(&self) -> Option<&ScrapeError> {
        match self {
            Self::Scrape(e) => Some(e),
            Self::Fetch(_) => None,
        }
    }
}

/// Convenience alias for Beatport source results.
pub type Result<T> = std::result::Result<T, Error>;
