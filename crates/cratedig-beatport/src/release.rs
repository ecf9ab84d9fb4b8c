//! Release detail extraction.
//!
//! The release page embeds the release object together with an anonymous
//! API session token, but only a truncated track list. The full track list
//! comes from the catalog API, authenticated with that token. The pipeline
//! is strictly linear (page, token, tracks, field mapping) and any failure
//! aborts the whole extraction.

use std::sync::Arc;

use serde_json::Value;

use cratedig_core::ReleaseRecord;

use crate::binding::{BeatportBinding, TRACKS_PAGE_SIZE};
use crate::error::{Result, ScrapeError};
use crate::fetch::{DocumentFetcher, JsonFetcher};
use crate::genres;
use crate::json::{self, ShapeError, Step};
use crate::state::embedded_state;
use crate::tracks;

const RELEASE_PATH: &[Step<'static>] = &[
    Step::Key("props"),
    Step::Key("pageProps"),
    Step::Key("release"),
];

const TOKEN_PATH: &[Step<'static>] = &[
    Step::Key("props"),
    Step::Key("pageProps"),
    Step::Key("anonSession"),
    Step::Key("access_token"),
];

/// Fetches and normalizes full Beatport releases.
#[derive(Debug, Clone)]
pub struct ReleaseExtractor {
    binding: BeatportBinding,
    documents: Arc<dyn DocumentFetcher>,
    json: Arc<dyn JsonFetcher>,
}

impl ReleaseExtractor {
    pub fn new(
        binding: BeatportBinding,
        documents: Arc<dyn DocumentFetcher>,
        json: Arc<dyn JsonFetcher>,
    ) -> Self {
        Self {
            binding,
            documents,
            json,
        }
    }

    /// Fetch a release by Beatport release URL or numeric id.
    pub async fn fetch_release(&self, id_or_url: &str) -> Result<ReleaseRecord> {
        let url = self.binding.resolve_release(id_or_url)?;
        let page = self.documents.fetch_document(&url, &[], true).await?;
        log::debug!("Fetched release page {}", page.url());

        let state = embedded_state(&page)?;
        let release = release_data(&state)?;
        let token = api_token(&state)?;
        let release_id = json::id_field(release, "id").map_err(|source| {
            ScrapeError::MissingReleaseField {
                field: "id",
                source,
            }
        })?;
        log::debug!("Found API token for release {}", release_id);

        let per_page = TRACKS_PAGE_SIZE.to_string();
        let authorization = format!("Bearer {token}");
        let response = self
            .json
            .fetch_json(
                &self.binding.release_tracks_url(release_id),
                &[("page", "1"), ("per_page", per_page.as_str())],
                &[("Authorization", authorization.as_str())],
            )
            .await?;
        let track_list = track_page(&response)?;
        log::debug!(
            "Fetched {} tracks for release {}",
            track_list.len(),
            release_id
        );

        let record = build_record(release, track_list)?;
        log::info!(
            "Extracted Beatport release {} ({} tracks)",
            record.title,
            record.track_count()
        );
        Ok(record)
    }
}

/// The release object of a release page state, which must carry a name.
fn release_data(state: &Value) -> std::result::Result<&Value, ScrapeError> {
    let release = json::path(state, RELEASE_PATH).map_err(ScrapeError::MissingReleaseData)?;
    let has_name = release
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.is_empty());
    if has_name {
        Ok(release)
    } else {
        Err(ScrapeError::InvalidReleaseData {
            reason: "missing required field 'name'".to_string(),
        })
    }
}

/// The anonymous API access token of a release page state.
fn api_token(state: &Value) -> std::result::Result<&str, ScrapeError> {
    json::path(state, TOKEN_PATH)
        .and_then(|token| {
            token.as_str().ok_or_else(|| ShapeError::WrongType {
                path: "props.pageProps.anonSession.access_token".to_string(),
                expected: "string",
            })
        })
        .map_err(ScrapeError::MissingApiToken)
}

/// The track list of a tracks response, refusing anything past page one.
fn track_page(response: &Value) -> std::result::Result<&[Value], ScrapeError> {
    let page = json::str_field(response, "page").map_err(ScrapeError::InvalidTrackPage)?;
    let total_pages = page
        .split_once('/')
        .and_then(|(_, total)| total.trim().parse::<u32>().ok())
        .ok_or_else(|| {
            ScrapeError::InvalidTrackPage(ShapeError::WrongType {
                path: "page".to_string(),
                expected: "`N/M` page string",
            })
        })?;

    if total_pages > 1 {
        return Err(ScrapeError::IncompletePagination {
            page: page.to_string(),
            page_size: TRACKS_PAGE_SIZE,
        });
    }

    json::array_field(response, "results").map_err(ScrapeError::InvalidTrackPage)
}

/// Map a release object and its full track list onto a [`ReleaseRecord`].
fn build_record(
    release: &Value,
    track_list: &[Value],
) -> std::result::Result<ReleaseRecord, ScrapeError> {
    let title = release_str(release, "title", &[Step::Key("name")])?;
    let cover_url = release_str(release, "cover", &[Step::Key("image"), Step::Key("uri")])?;
    let genres = release_genres(track_list)?;
    let release_date = release_str(release, "publish_date", &[Step::Key("publish_date")])?;
    let year = release_year(release_date)?;
    let label = release_str(release, "label", &[Step::Key("label"), Step::Key("name")])?;
    let catalog_number = json::opt_str_field(release, "catalog_number")
        .map_err(|source| ScrapeError::MissingReleaseField {
            field: "catalog number",
            source,
        })?
        .unwrap_or_default();

    Ok(ReleaseRecord {
        title: title.to_string(),
        cover_url: cover_url.to_string(),
        genres,
        year,
        release_date: release_date.to_string(),
        label: label.to_string(),
        catalog_number: catalog_number.to_string(),
        comment: None,
        tracks: tracks::parse_tracks(track_list)?,
    })
}

fn release_str<'v>(
    release: &'v Value,
    field: &'static str,
    steps: &[Step<'_>],
) -> std::result::Result<&'v str, ScrapeError> {
    json::path(release, steps)
        .and_then(|value| {
            value.as_str().ok_or_else(|| ShapeError::WrongType {
                path: field.to_string(),
                expected: "string",
            })
        })
        .map_err(|source| ScrapeError::MissingReleaseField { field, source })
}

/// Canonical genres across every track of the release.
fn release_genres(
    track_list: &[Value],
) -> std::result::Result<std::collections::BTreeSet<String>, ScrapeError> {
    let names = track_list
        .iter()
        .enumerate()
        .map(|(position, track)| {
            tracks::track_genre(track).map_err(|source| ScrapeError::MissingTrackField {
                track_number: position + 1,
                source,
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    genres::canonicalize(names).map_err(|genre| ScrapeError::UnknownGenre {
        genre: genre.to_string(),
    })
}

/// The integer year before the first `-` of a publish date.
fn release_year(publish_date: &str) -> std::result::Result<i32, ScrapeError> {
    let year = publish_date.split('-').next().unwrap_or(publish_date);
    year.trim()
        .parse()
        .map_err(|source| ScrapeError::InvalidReleaseDate {
            publish_date: publish_date.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::replay::ReplayFetcher;
    use cratedig_core::{ArtistCredit, ArtistRole};
    use serde_json::json;

    const SITE: &str = "http://site.test";
    const API: &str = "http://api.test";

    fn track(name: &str, mix: &str, genre: &str) -> Value {
        let remixers = if mix.ends_with("Remix") {
            json!([{"name": "C"}])
        } else {
            json!([])
        };
        json!({
            "name": name,
            "mix_name": mix,
            "artists": [{"name": "A"}, {"name": "B"}],
            "remixers": remixers,
            "isrc": format!("ISRC-{name}"),
            "is_available_for_streaming": true,
            "genre": {"name": genre}
        })
    }

    fn release() -> Value {
        json!({
            "id": 1234,
            "name": "Test EP",
            "image": {"uri": "https://img.test/cover.jpg"},
            "publish_date": "2021-07-15",
            "label": {"name": "Good Label"},
            "catalog_number": "GOOD001"
        })
    }

    fn state(release: Value) -> Value {
        json!({
            "buildId": "build-1",
            "props": {
                "pageProps": {
                    "release": release,
                    "anonSession": {"access_token": "tok-123"}
                }
            }
        })
    }

    fn page(state: &Value) -> String {
        format!(r#"<html><body><script id="__NEXT_DATA__" type="application/json">{state}</script></body></html>"#)
    }

    fn tracks_response(page: &str, results: Vec<Value>) -> Value {
        json!({"page": page, "per_page": 100, "results": results})
    }

    fn extractor(fetcher: ReplayFetcher) -> (ReleaseExtractor, Arc<ReplayFetcher>) {
        let fetcher = Arc::new(fetcher);
        let extractor = ReleaseExtractor::new(
            BeatportBinding::with_bases(SITE, API),
            fetcher.clone(),
            fetcher.clone(),
        );
        (extractor, fetcher)
    }

    #[test]
    fn test_release_data_requires_name() {
        assert!(release_data(&state(release())).is_ok());
        assert!(matches!(
            release_data(&state(json!({"id": 1, "name": ""}))),
            Err(ScrapeError::InvalidReleaseData { .. })
        ));
        assert!(matches!(
            release_data(&state(json!({"id": 1}))),
            Err(ScrapeError::InvalidReleaseData { .. })
        ));
        assert!(matches!(
            release_data(&json!({"props": {"pageProps": {}}})),
            Err(ScrapeError::MissingReleaseData(_))
        ));
    }

    #[test]
    fn test_release_data_accepts_blank_name() {
        let binding = state(json!({"id": 1, "name": " "}));
        let release = release_data(&binding).unwrap();
        assert_eq!(release["name"], " ");
    }

    #[test]
    fn test_api_token() {
        assert_eq!(api_token(&state(release())).unwrap(), "tok-123");
        assert!(matches!(
            api_token(&json!({"props": {"pageProps": {"release": {}}}})),
            Err(ScrapeError::MissingApiToken(_))
        ));
    }

    #[test]
    fn test_track_page_single_page() {
        let response = tracks_response("1/1", vec![track("One", "Original Mix", "House")]);
        assert_eq!(track_page(&response).unwrap().len(), 1);
    }

    #[test]
    fn test_track_page_rejects_more_pages() {
        let response = tracks_response("1/2", vec![]);
        assert!(matches!(
            track_page(&response),
            Err(ScrapeError::IncompletePagination { ref page, page_size: 100 }) if page == "1/2"
        ));
    }

    #[test]
    fn test_track_page_malformed() {
        assert!(matches!(
            track_page(&json!({"results": []})),
            Err(ScrapeError::InvalidTrackPage(_))
        ));
        assert!(matches!(
            track_page(&json!({"page": "one", "results": []})),
            Err(ScrapeError::InvalidTrackPage(_))
        ));
        assert!(matches!(
            track_page(&json!({"page": "1/1"})),
            Err(ScrapeError::InvalidTrackPage(_))
        ));
    }

    #[test]
    fn test_build_record_fields() {
        let tracks = vec![
            track("One", "Original Mix", "House"),
            track("Two", "C Remix", "Nu Disco / Disco"),
        ];
        let record = build_record(&release(), &tracks).unwrap();

        assert_eq!(record.title, "Test EP");
        assert_eq!(record.cover_url, "https://img.test/cover.jpg");
        assert_eq!(record.year, 2021);
        assert_eq!(record.release_date, "2021-07-15");
        assert_eq!(record.label, "Good Label");
        assert_eq!(record.catalog_number, "GOOD001");
        assert!(record.comment.is_none());
        assert_eq!(
            record.genres.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["Disco", "Electronic", "House", "Nu Disco"]
        );

        let disc = &record.tracks["1"];
        assert_eq!(disc[&1].title, "One");
        assert_eq!(disc[&2].title, "Two (C Remix)");
        assert_eq!(
            disc[&2].artists,
            vec![
                ArtistCredit::new("A", ArtistRole::Main),
                ArtistCredit::new("B", ArtistRole::Main),
                ArtistCredit::new("C", ArtistRole::Remixer),
            ]
        );
    }

    #[test]
    fn test_build_record_genres_ignore_track_order() {
        let forward = vec![
            track("One", "", "Techno (Peak Time / Driving)"),
            track("Two", "", "Minimal / Deep Tech"),
        ];
        let backward: Vec<Value> = forward.iter().rev().cloned().collect();
        assert_eq!(
            build_record(&release(), &forward).unwrap().genres,
            build_record(&release(), &backward).unwrap().genres
        );
    }

    #[test]
    fn test_build_record_unknown_genre() {
        let tracks = vec![track("One", "", "Polka")];
        assert!(matches!(
            build_record(&release(), &tracks),
            Err(ScrapeError::UnknownGenre { ref genre }) if genre == "Polka"
        ));
    }

    #[test]
    fn test_build_record_missing_label() {
        let mut release = release();
        release.as_object_mut().unwrap().remove("label");
        assert!(matches!(
            build_record(&release, &[]),
            Err(ScrapeError::MissingReleaseField { field: "label", .. })
        ));
    }

    #[test]
    fn test_release_year() {
        assert_eq!(release_year("2021-07-15").unwrap(), 2021);
        assert!(matches!(
            release_year("soon"),
            Err(ScrapeError::InvalidReleaseDate { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_release_end_to_end() {
        let tracks = vec![
            track("One", "Original Mix", "House"),
            track("Two", "C Remix", "House"),
        ];
        let (extractor, fetcher) = extractor(
            ReplayFetcher::new()
                .with_document(format!("{SITE}/release/-/1234"), page(&state(release())))
                .with_json(
                    format!("{API}/v4/catalog/releases/1234/tracks/"),
                    tracks_response("1/1", tracks),
                ),
        );

        let record = extractor.fetch_release("1234").await.unwrap();
        assert_eq!(record.track_count(), 2);
        assert_eq!(record.year, 2021);

        let requests = fetcher.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1].headers,
            vec![("Authorization".to_string(), "Bearer tok-123".to_string())]
        );
        assert_eq!(
            requests[1].query,
            vec![
                ("page".to_string(), "1".to_string()),
                ("per_page".to_string(), "100".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_release_incomplete_pagination() {
        let (extractor, _) = extractor(
            ReplayFetcher::new()
                .with_document(format!("{SITE}/release/-/1234"), page(&state(release())))
                .with_json(
                    format!("{API}/v4/catalog/releases/1234/tracks/"),
                    tracks_response("1/3", vec![track("One", "", "House")]),
                ),
        );

        let err = extractor.fetch_release("1234").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Scrape(ScrapeError::IncompletePagination { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_release_transport_error_passes_through() {
        let (extractor, _) = extractor(
            ReplayFetcher::new()
                .with_document(format!("{SITE}/release/-/1234"), page(&state(release()))),
        );

        let err = extractor.fetch_release("1234").await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }

    #[tokio::test]
    async fn test_fetch_release_unrecognized_input() {
        let (extractor, fetcher) = extractor(ReplayFetcher::new());
        let err = extractor.fetch_release("not-a-release").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Scrape(ScrapeError::UnrecognizedRelease { .. })
        ));
        assert!(fetcher.requests().is_empty());
    }
}
