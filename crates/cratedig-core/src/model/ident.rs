use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider-native release identifier.
pub type ReleaseId = u64;

/// The medium a release was published on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Media {
    /// Digital download or stream.
    Web,
    /// Compact disc.
    Cd,
    /// Vinyl record.
    Vinyl,
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Web => "WEB",
            Self::Cd => "CD",
            Self::Vinyl => "Vinyl",
        };
        f.write_str(name)
    }
}

/// Minimal identity fingerprint for a search candidate.
///
/// Callers use it to deduplicate and match candidates across sources. It
/// is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentData {
    artists: String,
    title: String,
    year: String,
    track_count: usize,
    media: Media,
}

impl IdentData {
    #[must_use]
    pub fn new(
        artists: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        track_count: usize,
        media: Media,
    ) -> Self {
        Self {
            artists: artists.into(),
            title: title.into(),
            year: year.into(),
            track_count,
            media,
        }
    }

    pub fn artists(&self) -> &str {
        &self.artists
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn track_count(&self) -> usize {
        self.track_count
    }

    pub fn media(&self) -> Media {
        self.media
    }
}

/// A single search candidate: its identity plus a human-readable summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub ident: IdentData,
    pub display: String,
}

/// Search candidates keyed by release id, in provider relevance order.
///
/// Keys are unique. Re-inserting an existing id replaces its value but keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    entries: Vec<(ReleaseId, SearchHit)>,
}

impl SearchResults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a hit, returning the previous value for `id` if there was one.
    pub fn insert(&mut self, id: ReleaseId, hit: SearchHit) -> Option<SearchHit> {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(key, _)| *key == id) {
            return Some(std::mem::replace(existing, hit));
        }
        self.entries.push((id, hit));
        None
    }

    pub fn get(&self, id: ReleaseId) -> Option<&SearchHit> {
        self.entries
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, hit)| hit)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ReleaseId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReleaseId, &SearchHit)> {
        self.entries.iter().map(|(id, hit)| (*id, hit))
    }
}

impl IntoIterator for SearchResults {
    type Item = (ReleaseId, SearchHit);
    type IntoIter = std::vec::IntoIter<(ReleaseId, SearchHit)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
