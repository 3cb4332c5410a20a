//! Maps track metadata onto the categories playlists are built from.
//!
//! Genres come from the artist's genre tags, decades from the album release
//! date, and the custom playlist from the track's audio features. None of
//! these ever fail: a track that fits no category simply has none.

use crate::types::{CustomCriteria, ReleaseDatePrecision, Track};

/// Genre keywords paired with the broad genre they collapse to.
///
/// Order matters: a tag is tested against the keywords from top to bottom
/// and the first keyword contained in the tag wins.
pub const GENRE_KEYWORDS: &[(&str, &str)] = &[
    ("rock", "Rock"),
    ("pop", "Pop"),
    ("country", "Country"),
    ("metal", "Metal"),
    ("hip hop", "Hip-hop"),
    ("rap", "Hip-hop"),
    ("soul", "Funk and Soul"),
    ("funk", "Funk and Soul"),
    ("blues", "Blues"),
    ("folk", "Folk Music"),
    ("edm", "Electronic"),
    ("house", "Electronic"),
    ("electronic", "Electronic"),
    ("techno", "Electronic"),
    ("jazz", "Jazz"),
    ("lounge", "Lounge Music"),
    ("swing", "Lounge Music"),
    ("r&b", "R&B"),
    ("classical", "Classical"),
    ("hollywood", "Musicals and Film Music"),
    ("show tunes", "Musicals and Film Music"),
    ("soundtrack", "Musicals and Film Music"),
    ("reggae", "Reggae"),
];

/// Decade labels with the first year each one covers, newest first.
/// Anything before the last entry is "Pre 1930".
const DECADES: &[(i32, &str)] = &[
    (2020, "2020s"),
    (2010, "2010s"),
    (2000, "2000s"),
    (1990, "90s"),
    (1980, "80s"),
    (1970, "70s"),
    (1960, "60s"),
    (1950, "50s"),
    (1940, "40s"),
    (1930, "30s"),
];

const PRE_1930: &str = "Pre 1930";

/// Years from here on have no decade label yet.
const DECADE_UPPER_BOUND: i32 = 2030;

/// Broad genre for a list of artist genre tags.
///
/// Tags are scanned from the last to the first, since artists with many
/// tags tend to list the broader one last. The first tag containing one of
/// [`GENRE_KEYWORDS`] decides. No tags, or no tag matching any keyword,
/// gives `None`.
pub fn genre_of<S: AsRef<str>>(tags: &[S]) -> Option<&'static str> {
    tags.iter().rev().find_map(|tag| {
        let tag = tag.as_ref();
        GENRE_KEYWORDS
            .iter()
            .find(|(keyword, _)| tag.contains(keyword))
            .map(|(_, genre)| *genre)
    })
}

/// Decade label for an album release date.
///
/// A `Year` precision date is the year itself; for anything else the year
/// is the first four characters of the date. A date without a readable year
/// and years from 2030 on have no decade.
pub fn decade_of(release_date: &str, precision: ReleaseDatePrecision) -> Option<&'static str> {
    let year = match precision {
        ReleaseDatePrecision::Year => release_date,
        // every other precision writes the date as "YYYY..."
        _ => release_date.get(..4)?,
    };
    let year: i32 = year.trim().parse().ok()?;

    if year >= DECADE_UPPER_BOUND {
        return None;
    }

    Some(
        DECADES
            .iter()
            .find(|(start, _)| year >= *start)
            .map_or(PRE_1930, |(_, label)| *label),
    )
}

/// Whether the track's audio features fall inside every range of `criteria`.
///
/// The ranges are given in percent and compared against the 0-1 feature
/// values; both bounds are inclusive.
pub fn matches_custom(track: &Track, criteria: &CustomCriteria) -> bool {
    within(track.energy, criteria.energy)
        && within(track.danceability, criteria.danceability)
        && within(track.valence, criteria.valence)
}

fn within(value: f64, range: [f64; 2]) -> bool {
    let [min, max] = range.map(|bound| bound / 100.0);
    min <= value && value <= max
}
