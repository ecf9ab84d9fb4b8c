mod ident;
mod release;

pub use ident::{IdentData, Media, ReleaseId, SearchHit, SearchResults};
pub use release::{ArtistCredit, ArtistRole, DiscTracks, ReleaseRecord, TrackRecord};
