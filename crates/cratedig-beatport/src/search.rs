//! Release search.
//!
//! Searching takes two round-trips. The HTML search page is fetched only
//! for its embedded state, which carries the site build identifier; that
//! identifier is then used to call the site's internal JSON search
//! endpoint, whose dehydrated query state holds the actual results.

use std::sync::Arc;

use serde_json::Value;

use cratedig_core::{IdentData, Media, ReleaseId, ResultFormatter, SearchHit, SearchResults};

use crate::binding::{BeatportBinding, SOURCE_NAME};
use crate::config::Config;
use crate::error::{Result, ScrapeError};
use crate::fetch::{DocumentFetcher, JsonFetcher};
use crate::json::{self, ShapeError, Step};
use crate::state::embedded_state;

/// Artist lists at least this long are replaced by the various-artists marker.
const VARIOUS_ARTISTS_THRESHOLD: usize = 4;

/// Where the results list lives in the search data document.
const RESULTS_PATH: &[Step<'static>] = &[
    Step::Key("pageProps"),
    Step::Key("dehydratedState"),
    Step::Key("queries"),
    Step::Index(0),
    Step::Key("state"),
    Step::Key("data"),
    Step::Key("data"),
];

/// The fields of one search result the searcher cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResultFields {
    release_id: ReleaseId,
    artists: Vec<String>,
    title: String,
    label: String,
    track_count: usize,
    year: String,
    catalog_number: String,
}

/// Searches Beatport for releases.
#[derive(Debug, Clone)]
pub struct Searcher {
    binding: BeatportBinding,
    documents: Arc<dyn DocumentFetcher>,
    json: Arc<dyn JsonFetcher>,
    formatter: Arc<dyn ResultFormatter>,
    config: Arc<Config>,
}

impl Searcher {
    pub fn new(
        binding: BeatportBinding,
        documents: Arc<dyn DocumentFetcher>,
        json: Arc<dyn JsonFetcher>,
        formatter: Arc<dyn ResultFormatter>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            binding,
            documents,
            json,
            formatter,
            config,
        }
    }

    /// Search for releases matching `query`, keeping at most `limit` results.
    ///
    /// A `limit` of 0 keeps every result the provider returns. Releases on
    /// excluded labels are skipped and do not count toward the limit.
    pub async fn search(&self, query: &str, limit: usize) -> Result<(&'static str, SearchResults)> {
        let page = self
            .documents
            .fetch_document(&self.binding.search_url(), &[("q", query)], true)
            .await?;
        let state = embedded_state(&page)?;
        let build_id = build_identifier(&state)?;
        log::debug!("Beatport build identifier: {}", build_id);

        let data = self
            .json
            .fetch_json(
                &self.binding.search_data_url(build_id),
                &[("q", query), ("type", "releases")],
                &[],
            )
            .await?;

        let results = collect_results(&data, limit, &self.config, self.formatter.as_ref())?;
        log::info!(
            "Beatport search for {:?} returned {} results",
            query,
            results.len()
        );
        Ok((SOURCE_NAME, results))
    }
}

/// The build identifier carried in the search page state.
fn build_identifier(state: &Value) -> std::result::Result<&str, ScrapeError> {
    json::str_field(state, "buildId").map_err(ScrapeError::MissingBuildIdentifier)
}

/// The raw results list of a search data document.
fn results_list(data: &Value) -> std::result::Result<&[Value], ScrapeError> {
    json::path(data, RESULTS_PATH)
        .and_then(|results| {
            results.as_array().map(Vec::as_slice).ok_or_else(|| ShapeError::WrongType {
                path: "pageProps.dehydratedState.queries[0].state.data.data".to_string(),
                expected: "array",
            })
        })
        .map_err(ScrapeError::MissingSearchResults)
}

/// Turn a search data document into ordered, filtered, limited results.
fn collect_results(
    data: &Value,
    limit: usize,
    config: &Config,
    formatter: &dyn ResultFormatter,
) -> std::result::Result<SearchResults, ScrapeError> {
    let mut results = SearchResults::new();

    for (position, raw) in results_list(data)?.iter().enumerate() {
        let fields = result_fields(raw)
            .map_err(|source| ScrapeError::MalformedSearchResult { position, source })?;

        if config.is_excluded_label(&fields.label) {
            log::debug!(
                "Skipping release {} on excluded label {}",
                fields.release_id,
                fields.label
            );
        } else {
            let artists = artist_display(&fields.artists, &config.various_artists_marker);
            let detail = format!("{} {} {}", fields.year, fields.label, fields.catalog_number);
            let display =
                formatter.format_result(&artists, &fields.title, &detail, fields.track_count);
            log::debug!("Search result {}: {}", fields.release_id, display);

            results.insert(
                fields.release_id,
                SearchHit {
                    ident: IdentData::new(
                        artists,
                        fields.title,
                        fields.year,
                        fields.track_count,
                        Media::Web,
                    ),
                    display,
                },
            );
        }

        if limit != 0 && results.len() == limit {
            break;
        }
    }

    Ok(results)
}

fn result_fields(raw: &Value) -> std::result::Result<ResultFields, ShapeError> {
    let release_id = json::id_field(raw, "release_id")?;
    let artists = json::array_field(raw, "artists")?
        .iter()
        .map(|artist| json::str_field(artist, "artist_name").map(str::to_string))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let title = json::str_field(raw, "release_name")?.to_string();
    let label = json::path(raw, &[Step::Key("label"), Step::Key("label_name")])?
        .as_str()
        .ok_or_else(|| ShapeError::WrongType {
            path: "label.label_name".to_string(),
            expected: "string",
        })?
        .to_string();
    let track_count = json::array_field(raw, "tracks")?.len();
    let year = release_year(json::str_field(raw, "release_date")?)?;
    let catalog_number = json::opt_str_field(raw, "catalog_number")?
        .unwrap_or_default()
        .to_string();

    Ok(ResultFields {
        release_id,
        artists,
        title,
        label,
        track_count,
        year,
        catalog_number,
    })
}

/// The year component of a `YYYY-MM-DD` date string.
fn release_year(release_date: &str) -> std::result::Result<String, ShapeError> {
    release_date
        .split('-')
        .next()
        .filter(|year| !year.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ShapeError::WrongType {
            path: "release_date".to_string(),
            expected: "YYYY-MM-DD date",
        })
}

/// Join artist names, or use the various-artists marker for long lists.
fn artist_display(artists: &[String], various_artists_marker: &str) -> String {
    if artists.len() >= VARIOUS_ARTISTS_THRESHOLD {
        various_artists_marker.to_string()
    } else {
        artists.join(", ")
    }
}
