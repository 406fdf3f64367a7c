use itunes_reader::plist::read_plist_str;
use itunes_reader::{format, Library, LibraryError, MediaKind};
use std::fs;
use tempfile::TempDir;

/// A small but complete export: six tracks covering every media
/// category, a master playlist, and a Music > Rock folder hierarchy.
const LIBRARY_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple Computer//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Major Version</key><integer>1</integer>
    <key>Minor Version</key><integer>1</integer>
    <key>Application Version</key><string>12.9.0.167</string>
    <key>Date</key><date>2021-03-14T09:26:53Z</date>
    <key>Library Persistent ID</key><string>F0E1D2C3B4A59687</string>
    <key>Tracks</key>
    <dict>
        <key>101</key>
        <dict>
            <key>Track ID</key><integer>101</integer>
            <key>Name</key><string>Paranoid</string>
            <key>Artist</key><string>Black Sabbath</string>
            <key>Album</key><string>Paranoid</string>
            <key>Genre</key><string>Rock</string>
            <key>Size</key><integer>2500000</integer>
            <key>Total Time</key><integer>90000</integer>
            <key>Rating</key><integer>80</integer>
            <key>Date Added</key><date>2020-01-02T10:00:00Z</date>
            <key>Loved</key><true/>
            <key>Location</key><string>file://localhost/Users/me/My%20Music/Paranoid.mp3</string>
        </dict>
        <key>102</key>
        <dict>
            <key>Track ID</key><integer>102</integer>
            <key>Name</key><string>Some Film</string>
            <key>Movie</key><true/>
            <key>Has Video</key><true/>
        </dict>
        <key>103</key>
        <dict>
            <key>Track ID</key><integer>103</integer>
            <key>Name</key><string>Weekly Show</string>
            <key>Podcast</key><true/>
        </dict>
        <key>104</key>
        <dict>
            <key>Track ID</key><integer>104</integer>
            <key>Name</key><string>Pilot</string>
            <key>TV Show</key><true/>
            <key>Series</key><string>Some Series</string>
            <key>Season</key><integer>1</integer>
        </dict>
        <key>105</key>
        <dict>
            <key>Track ID</key><integer>105</integer>
            <key>Name</key><string>Chapter One</string>
            <key>Location</key><string>file://localhost/Users/me/Audiobooks/Chapter%20One.m4b</string>
        </dict>
        <key>106</key>
        <dict>
            <key>Track ID</key><integer>106</integer>
            <key>Name</key><string>B-Side</string>
            <key>Play Date Local</key><string>yesterday</string>
        </dict>
    </dict>
    <key>Playlists</key>
    <array>
        <dict>
            <key>Name</key><string>Library</string>
            <key>Master</key><true/>
            <key>Playlist ID</key><integer>1</integer>
            <key>Playlist Persistent ID</key><string>LIB0</string>
            <key>Visible</key><false/>
            <key>All Items</key><true/>
            <key>Playlist Items</key>
            <array>
                <dict><key>Track ID</key><integer>101</integer></dict>
                <dict><key>Track ID</key><integer>102</integer></dict>
                <dict><key>Track ID</key><integer>103</integer></dict>
                <dict><key>Track ID</key><integer>104</integer></dict>
                <dict><key>Track ID</key><integer>105</integer></dict>
                <dict><key>Track ID</key><integer>106</integer></dict>
            </array>
        </dict>
        <dict>
            <key>Name</key><string>Music</string>
            <key>Playlist Persistent ID</key><string>MUSIC1</string>
            <key>Distinguished Kind</key><integer>4</integer>
            <key>Folder</key><true/>
        </dict>
        <dict>
            <key>Name</key><string>Rock</string>
            <key>Playlist ID</key><integer>3</integer>
            <key>Playlist Persistent ID</key><string>ROCK1</string>
            <key>Parent Persistent ID</key><string>MUSIC1</string>
            <key>Playlist Items</key>
            <array>
                <dict><key>Track ID</key><integer>101</integer></dict>
                <dict><key>Track ID</key><integer>106</integer></dict>
                <dict><key>Track ID</key><integer>101</integer></dict>
            </array>
        </dict>
    </array>
</dict>
</plist>
"#;

/// Write the fixture to disk and parse it through the file front door
fn parse_fixture() -> Library {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("iTunes Music Library.xml");
    fs::write(&path, LIBRARY_XML).expect("Failed to write fixture");

    Library::from_file(&path).expect("Failed to parse fixture library")
}

#[test]
fn test_parses_counts_and_categories() {
    let library = parse_fixture();

    assert_eq!(library.track_count(), 6);
    assert_eq!(library.playlist_count(), 3);

    assert_eq!(library.songs().len(), 2);
    assert_eq!(library.movies().len(), 1);
    assert_eq!(library.podcasts().len(), 1);
    assert_eq!(library.tv_shows().len(), 1);
    assert_eq!(library.audiobooks().len(), 1);

    // The category lists partition the track index
    let total: usize = MediaKind::ALL
        .iter()
        .map(|kind| library.tracks_in(*kind).len())
        .sum();
    assert_eq!(total, library.track_count());

    assert_eq!(library.audiobooks()[0].track_id, 105);
    assert_eq!(library.movies()[0].track_id, 102);
}

#[test]
fn test_every_playlist_reference_resolves() {
    let library = parse_fixture();

    for playlist in library.playlists() {
        for id in &playlist.items {
            assert!(
                library.track_by_id(*id).is_some(),
                "playlist {:?} references missing track {}",
                playlist.name_str(),
                id
            );
        }
    }
}

#[test]
fn test_display_paths_reconstruct_folders() {
    let library = parse_fixture();

    assert_eq!(
        library.playlist_by_name("Library").unwrap().display_path,
        "/Library"
    );
    assert_eq!(
        library.playlist_by_name("Music").unwrap().display_path,
        "/Music"
    );
    assert_eq!(
        library.playlist_by_name("Rock").unwrap().display_path,
        "/Music/Rock"
    );
}

#[test]
fn test_playlist_contents_by_name_and_id() {
    let library = parse_fixture();

    // Duplicates preserved, order preserved
    let by_name = library.get_playlist_contents("Rock").unwrap();
    let ids: Vec<i64> = by_name.iter().map(|t| t.track_id).collect();
    assert_eq!(ids, vec![101, 106, 101]);

    let by_id = library.get_playlist_contents("ROCK1").unwrap();
    assert_eq!(by_id.len(), 3);

    assert!(matches!(
        library.get_playlist_contents("No Such List"),
        Err(LibraryError::UnknownPlaylist(_))
    ));
}

#[test]
fn test_track_attributes_and_helpers() {
    let library = parse_fixture();
    let track = library.track_by_id(101).unwrap();

    assert_eq!(track.name.as_deref(), Some("Paranoid"));
    assert_eq!(track.loved, Some(true));
    assert_eq!(
        track.location.as_deref(),
        Some("file://localhost/Users/me/My Music/Paranoid.mp3")
    );

    assert_eq!(format::size_mb(track.size), Some(2.5));
    assert_eq!(format::size_label(track.size), "2.50 MB");
    assert_eq!(format::total_seconds(track.total_time), 90);
    assert_eq!(format::star_rating(track.rating), Some(4.0));
    assert_eq!(
        format::track_path(track.location.as_deref().unwrap()),
        "Users/me/My Music/Paranoid.mp3"
    );

    // Absent attributes stay absent, not zeroed
    assert_eq!(track.bit_rate, None);
    assert_eq!(format::size_label(library.track_by_id(106).unwrap().size), "unknown");
}

#[test]
fn test_mapping_round_trip_key_set() {
    let library = parse_fixture();
    let track = library.track_by_id(101).unwrap();

    let map = track.as_mapping();
    let expected = [
        "Track ID",
        "Name",
        "Artist",
        "Album",
        "Genre",
        "Size",
        "Total Time",
        "Rating",
        "Date Added",
        "Loved",
        "Location",
    ];
    assert_eq!(map.len(), expected.len());
    for key in expected {
        assert!(map.contains_key(key), "missing {key}");
    }

    assert_eq!(map["Size"], serde_json::json!(2_500_000));
    assert_eq!(map["Date Added"], serde_json::json!("2020-01-02T10:00:00Z"));
}

#[test]
fn test_playlist_mapping_includes_tracks_and_kind_label() {
    let library = parse_fixture();
    let music = library.playlist_by_name("Music").unwrap();

    let translated = music.as_mapping(&library, true);
    assert_eq!(translated["Distinguished Kind"], serde_json::json!("Music"));

    let raw = music.as_mapping(&library, false);
    assert_eq!(raw["Distinguished Kind"], serde_json::json!(4));

    let rock = library.playlist_by_name("Rock").unwrap().as_mapping(&library, false);
    let tracks = rock["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks[0]["Track ID"], serde_json::json!(101));
    assert_eq!(tracks[1]["Track ID"], serde_json::json!(106));
}

#[test]
fn test_unknown_attributes_are_kept_and_reported() {
    let library = parse_fixture();

    let track = library.track_by_id(106).unwrap();
    assert!(track.extra.contains_key("Play Date Local"));

    assert!(library
        .diagnostics()
        .unhandled_keys()
        .contains("Play Date Local"));
}

#[test]
fn test_dangling_track_reference_aborts_the_parse() {
    let xml = LIBRARY_XML.replace(
        "<dict><key>Track ID</key><integer>106</integer></dict>",
        "<dict><key>Track ID</key><integer>999</integer></dict>",
    );

    let tree = read_plist_str(&xml).unwrap();
    let err = Library::from_tree(&tree);
    assert!(matches!(
        err,
        Err(LibraryError::UnknownTrackId { track_id: 999, .. })
    ));
}

#[test]
fn test_malformed_playlist_item_aborts_the_parse() {
    let xml = LIBRARY_XML.replace(
        "<dict><key>Track ID</key><integer>103</integer></dict>",
        "<dict><key>Track ID</key><string>103</string></dict>",
    );

    let tree = read_plist_str(&xml).unwrap();
    let err = Library::from_tree(&tree);
    assert!(matches!(
        err,
        Err(LibraryError::MalformedPlaylistItem { .. })
    ));
}
