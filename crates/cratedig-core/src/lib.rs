//! Core domain model for cratedig.
//!
//! This crate defines the canonical, source-agnostic records that every
//! metadata source normalizes into: search identities, release records,
//! track records with role-tagged artist credits, and the display-string
//! formatting used when presenting search candidates.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod format;
pub mod model;

pub use format::{PlainFormatter, ResultFormatter};
pub use model::{
    ArtistCredit, ArtistRole, DiscTracks, IdentData, Media, ReleaseId, ReleaseRecord, SearchHit,
    SearchResults, TrackRecord,
};
