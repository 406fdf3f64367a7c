//! Static attribute schema for library exports
//!
//! The fixed set of keys iTunes/Music writes for tracks and playlists.
//! Keys outside these tables still get decoded, but land in the record's
//! extra-attribute map and in the end-of-pass diagnostics.

/// Known track attribute keys, as written by iTunes/Music
pub const TRACK_ATTRIBUTES: [&str; 61] = [
    "Track ID",
    "Size",
    "Total Time",
    "Date Modified",
    "Date Added",
    "Bit Rate",
    "Sample Rate",
    "Play Count",
    "Play Date",
    "Play Date UTC",
    "Skip Count",
    "Skip Date",
    "Rating",
    "Album Rating",
    "Persistent ID",
    "Track Type",
    "File Folder Count",
    "Library Folder Count",
    "Name",
    "Artist",
    "Kind",
    "Location",
    "Album",
    "Genre",
    "Year",
    "Release Date",
    "Artwork Count",
    "Sort Artist",
    "Sort Name",
    "Content Rating",
    "Purchased",
    "Has Video",
    "HD",
    "Movie",
    "Album Artist",
    "Composer",
    "Disc Number",
    "Disc Count",
    "Track Number",
    "Track Count",
    "Normalization",
    "Sort Album",
    "Loved",
    "Compilation",
    "Sort Album Artist",
    "Series",
    "Episode Order",
    "TV Show",
    "Protected",
    "Video Width",
    "Video Height",
    "Season",
    "BPM",
    "Podcast",
    "Unplayed",
    "Comments",
    "Part Of Gapless Album",
    "Work",
    "Clean",
    "Explicit",
    "Sort Composer",
];

/// Known playlist attribute keys ("Playlist Items" is handled structurally,
/// not as a scalar attribute)
pub const PLAYLIST_ATTRIBUTES: [&str; 16] = [
    "Name",
    "Master",
    "Playlist ID",
    "Playlist Persistent ID",
    "Parent Persistent ID",
    "Distinguished Kind",
    "Music",
    "Movies",
    "TV Shows",
    "Podcasts",
    "Audiobooks",
    "Visible",
    "All Items",
    "Folder",
    "Smart Info",
    "Smart Criteria",
];

pub fn is_track_attribute(key: &str) -> bool {
    TRACK_ATTRIBUTES.contains(&key)
}

pub fn is_playlist_attribute(key: &str) -> bool {
    PLAYLIST_ATTRIBUTES.contains(&key)
}

/// Human-readable label for a built-in playlist's "Distinguished Kind" code.
///
/// Covers the codes seen in real library exports; unknown codes stay numeric.
pub fn distinguished_kind_label(kind: i64) -> Option<&'static str> {
    match kind {
        2 => Some("Movies"),
        3 => Some("TV Shows"),
        4 => Some("Music"),
        5 => Some("Audiobooks"),
        6 => Some("Ringtones"),
        10 => Some("Podcasts"),
        19 => Some("Purchases"),
        26 => Some("Genius"),
        32 => Some("iTunes U"),
        65 => Some("Downloaded"),
        103 => Some("Music Videos"),
        _ => None,
    }
}
