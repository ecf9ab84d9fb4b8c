//! Beatport metadata source for cratedig.
//!
//! Implements release search and full release extraction against the
//! Beatport website and catalog API, normalizing both into the canonical
//! records defined in `cratedig-core`.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod binding;
pub mod config;
pub mod error;
pub mod fetch;
pub mod genres;
pub mod json;
pub mod release;
#[cfg(any(test, feature = "replay"))]
pub mod replay;
pub mod search;
pub mod source;
pub mod state;
pub mod tracks;

pub use binding::{parse_release_url, BeatportBinding, SOURCE_NAME};
pub use config::Config;
pub use error::{Error, FetchError, Result, ScrapeError};
pub use fetch::{Document, DocumentFetcher, HttpFetcher, JsonFetcher};
pub use release::ReleaseExtractor;
#[cfg(any(test, feature = "replay"))]
pub use replay::{RecordedRequest, ReplayFetcher};
pub use search::Searcher;
pub use source::BeatportSource;
