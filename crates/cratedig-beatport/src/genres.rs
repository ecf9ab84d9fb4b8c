//! Beatport genre taxonomy mapped onto canonical genre tags.
//!
//! Beatport genres often bundle several styles into one name
//! ("Nu Disco / Disco"). Each is split into the canonical tags it stands
//! for. The table covers the full catalog genre list; a name outside it is
//! treated as an error by the release extractor rather than dropped.

use std::collections::BTreeSet;

/// Tag every Beatport release carries.
pub const BASE_GENRE: &str = "Electronic";

const SPLIT_GENRES: &[(&str, &[&str])] = &[
    ("140 / Deep Dubstep / Grime", &["140bpm", "Deep Dubstep", "Grime"]),
    ("Afro House", &["Afro House"]),
    ("Amapiano", &["Amapiano"]),
    ("Ambient / Experimental", &["Ambient", "Experimental"]),
    ("Bass / Club", &["Bass", "Club"]),
    ("Bass House", &["Bass House"]),
    ("Brazilian Funk", &["Brazilian Funk"]),
    ("Breaks / Breakbeat / UK Bass", &["Breaks", "Breakbeat", "UK Bass"]),
    ("Dance / Pop", &["Dance", "Pop"]),
    ("Deep House", &["Deep House"]),
    ("DJ Tools", &["DJ Tool"]),
    ("Downtempo", &["Downtempo"]),
    ("Drum & Bass", &["Drum and Bass"]),
    ("Dubstep", &["Dubstep"]),
    ("Electro (Classic / Detroit / Modern)", &["Electro"]),
    ("Electronica", &["Electronica"]),
    ("Funky House", &["Funky House"]),
    (
        "Hard Dance / Hardcore / Neo Rave",
        &["Hard Dance", "Hardcore Dance", "Neo Rave"],
    ),
    ("Hard Techno", &["Hard Techno"]),
    ("House", &["House"]),
    ("Indie Dance", &["Indie Dance"]),
    ("Jackin House", &["Jackin House"]),
    ("Mainstage", &["Mainstage"]),
    ("Melodic House & Techno", &["Melodic House", "Techno"]),
    ("Minimal / Deep Tech", &["Minimal", "Deep Tech"]),
    ("Nu Disco / Disco", &["Nu Disco", "Disco"]),
    ("Organic House", &["Organic House"]),
    ("Progressive House", &["Progressive House"]),
    ("Psy-Trance", &["PsyTrance"]),
    ("Tech House", &["Tech House"]),
    ("Techno (Peak Time / Driving)", &["Techno"]),
    (
        "Techno (Raw / Deep / Hypnotic)",
        &["Techno", "Hypnotic Techno", "Deep Techno"],
    ),
    ("Trance (Main Floor)", &["Trance", "Main Floor"]),
    ("Trance (Raw / Deep / Hypnotic)", &["Trance", "Deep", "Hypnotic"]),
    ("Trap / Future Bass", &["Trap", "Future Bass"]),
    ("UK Garage / Bassline", &["UK Garage", "Bassline"]),
];

/// Canonical tags for a Beatport genre name, or `None` if unknown.
///
/// Matching is exact: Beatport genre names are fixed strings.
pub fn canonical_genres(name: &str) -> Option<&'static [&'static str]> {
    SPLIT_GENRES
        .iter()
        .find(|(beatport, _)| *beatport == name)
        .map(|(_, tags)| *tags)
}

/// Union the canonical tags of `names` on top of [`BASE_GENRE`].
///
/// Returns the first unknown name as the error.
pub fn canonicalize<'a, I>(names: I) -> Result<BTreeSet<String>, &'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut genres = BTreeSet::from([BASE_GENRE.to_string()]);
    for name in names {
        let tags = canonical_genres(name).ok_or(name)?;
        genres.extend(tags.iter().map(|tag| (*tag).to_string()));
    }
    Ok(genres)
}
