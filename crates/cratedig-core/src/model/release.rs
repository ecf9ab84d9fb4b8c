use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The part an artist plays on a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtistRole {
    Main,
    Remixer,
}

/// A named artist credited on a track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtistCredit {
    pub name: String,
    pub role: ArtistRole,
}

impl ArtistCredit {
    #[must_use]
    pub fn new(name: impl Into<String>, role: ArtistRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    #[must_use]
    pub fn main(name: impl Into<String>) -> Self {
        Self::new(name, ArtistRole::Main)
    }

    #[must_use]
    pub fn remixer(name: impl Into<String>) -> Self {
        Self::new(name, ArtistRole::Remixer)
    }
}

/// A normalized track.
///
/// `title` already carries any remix annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub track_number: u32,
    pub disc_number: u32,
    pub artists: Vec<ArtistCredit>,
    pub title: String,
    pub isrc: Option<String>,
    pub streamable: bool,
}

/// Tracks keyed by disc number, then by 1-based track number.
pub type DiscTracks = BTreeMap<String, BTreeMap<u32, TrackRecord>>;

/// A fully normalized release, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub title: String,
    pub cover_url: String,
    pub genres: BTreeSet<String>,
    pub year: i32,
    /// `YYYY-MM-DD`, as published by the source.
    pub release_date: String,
    pub label: String,
    pub catalog_number: String,
    pub comment: Option<String>,
    pub tracks: DiscTracks,
}

impl ReleaseRecord {
    /// Total number of tracks across all discs.
    pub fn track_count(&self) -> usize {
        self.tracks.values().map(BTreeMap::len).sum()
    }

    /// Iterate tracks disc by disc, in track-number order.
    pub fn iter_tracks(&self) -> impl Iterator<Item = &TrackRecord> {
        self.tracks.values().flat_map(BTreeMap::values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(number: u32, title: &str) -> TrackRecord {
        TrackRecord {
            track_number: number,
            disc_number: 1,
            artists: vec![ArtistCredit::main("A")],
            title: title.to_string(),
            isrc: None,
            streamable: true,
        }
    }

    #[test]
    fn test_artist_credit_constructors() {
        assert_eq!(ArtistCredit::main("A").role, ArtistRole::Main);
        assert_eq!(ArtistCredit::remixer("B").role, ArtistRole::Remixer);
    }

    #[test]
    fn test_artist_role_serializes_lowercase() {
        let json = serde_json::to_string(&ArtistCredit::remixer("C")).unwrap();
        assert_eq!(json, r#"{"name":"C","role":"remixer"}"#);
    }

    #[test]
    fn test_release_track_count_and_order() {
        let mut disc = BTreeMap::new();
        disc.insert(2, track(2, "Second"));
        disc.insert(1, track(1, "First"));
        let mut tracks = DiscTracks::new();
        tracks.insert("1".to_string(), disc);

        let release = ReleaseRecord {
            title: "Test EP".to_string(),
            cover_url: "https://example.com/cover.jpg".to_string(),
            genres: BTreeSet::from(["Electronic".to_string()]),
            year: 2021,
            release_date: "2021-07-15".to_string(),
            label: "Label".to_string(),
            catalog_number: "CAT001".to_string(),
            comment: None,
            tracks,
        };

        assert_eq!(release.track_count(), 2);
        let titles: Vec<_> = release.iter_tracks().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }
}
