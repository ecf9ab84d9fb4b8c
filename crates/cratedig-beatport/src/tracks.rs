//! Track and artist normalization.
//!
//! Beatport does not expose disc groupings, so every track lands on disc 1
//! and is numbered by its position in the tracks response.

use std::collections::BTreeMap;

use serde_json::Value;

use cratedig_core::{ArtistCredit, DiscTracks, TrackRecord};

use crate::error::ScrapeError;
use crate::json::{self, ShapeError, Step};

/// Mix name Beatport uses for the un-remixed version of a track.
pub const ORIGINAL_MIX: &str = "Original Mix";

const SINGLE_DISC: u32 = 1;

/// Append the mix name to a track name unless it is empty or the original mix.
pub fn fold_title(name: &str, mix_name: Option<&str>) -> String {
    match mix_name {
        Some(mix) if !mix.is_empty() && mix != ORIGINAL_MIX => format!("{name} ({mix})"),
        _ => name.to_string(),
    }
}

/// Main artists followed by remixers, each group in provider order.
pub fn track_artists(track: &Value) -> Result<Vec<ArtistCredit>, ShapeError> {
    let mains = json::array_field(track, "artists")?;
    let remixers = json::array_field(track, "remixers")?;

    let mut credits = Vec::with_capacity(mains.len() + remixers.len());
    for artist in mains {
        credits.push(ArtistCredit::main(json::str_field(artist, "name")?));
    }
    for remixer in remixers {
        credits.push(ArtistCredit::remixer(json::str_field(remixer, "name")?));
    }
    Ok(credits)
}

/// The Beatport genre name of a track.
pub fn track_genre(track: &Value) -> Result<&str, ShapeError> {
    json::path(track, &[Step::Key("genre"), Step::Key("name")])?
        .as_str()
        .ok_or_else(|| ShapeError::WrongType {
            path: "genre.name".to_string(),
            expected: "string",
        })
}

/// Normalize one track at the given 1-based position.
pub fn parse_track(track: &Value, track_number: u32) -> Result<TrackRecord, ShapeError> {
    let name = json::str_field(track, "name")?;
    let mix_name = json::opt_str_field(track, "mix_name")?;

    Ok(TrackRecord {
        track_number,
        disc_number: SINGLE_DISC,
        artists: track_artists(track)?,
        title: fold_title(name, mix_name),
        isrc: json::opt_str_field(track, "isrc")?.map(str::to_string),
        streamable: json::bool_field(track, "is_available_for_streaming")?,
    })
}

/// Normalize a whole track list into disc/track-numbered records.
///
/// Fails on the first malformed track.
pub fn parse_tracks(tracks: &[Value]) -> Result<DiscTracks, ScrapeError> {
    let mut disc = BTreeMap::new();
    for (position, track) in tracks.iter().enumerate() {
        let track_number = position + 1;
        let number = u32::try_from(track_number).map_err(|_| ScrapeError::MissingTrackField {
            track_number,
            source: ShapeError::WrongType {
                path: "tracks".to_string(),
                expected: "track list within u32 range",
            },
        })?;
        let record = parse_track(track, number).map_err(|source| ScrapeError::MissingTrackField {
            track_number,
            source,
        })?;
        disc.insert(number, record);
    }

    let mut discs = DiscTracks::new();
    discs.insert(SINGLE_DISC.to_string(), disc);
    Ok(discs)
}
