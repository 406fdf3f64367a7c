use super::{AttrMap, Mapping};
use super::{put_bool, put_date, put_i64, put_str};
use super::{take_bool, take_date, take_i64, take_string};
use crate::error::LibraryError;
use crate::plist::Value;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Media category a track belongs to; every track is in exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MediaKind {
    Song,
    Movie,
    Podcast,
    TvShow,
    Audiobook,
}

impl MediaKind {
    pub const ALL: [MediaKind; 5] = [
        MediaKind::Song,
        MediaKind::Movie,
        MediaKind::Podcast,
        MediaKind::TvShow,
        MediaKind::Audiobook,
    ];
}

/// A single track from the library export.
///
/// Every known attribute is an `Option`: a missing key and a key with an
/// empty payload both read as `None`, never as zero or an empty string.
#[derive(Debug, Clone, Serialize)]
pub struct Track {
    /// Numeric identifier, unique within one library
    pub track_id: i64,

    // Storage and playback counters
    pub size: Option<i64>,
    pub total_time: Option<i64>,
    pub date_modified: Option<DateTime<Utc>>,
    pub date_added: Option<DateTime<Utc>>,
    pub bit_rate: Option<i64>,
    pub sample_rate: Option<i64>,
    pub play_count: Option<i64>,
    pub play_date: Option<i64>,
    pub play_date_utc: Option<DateTime<Utc>>,
    pub skip_count: Option<i64>,
    pub skip_date: Option<DateTime<Utc>>,
    pub rating: Option<i64>,
    pub album_rating: Option<i64>,
    pub persistent_id: Option<String>,
    pub track_type: Option<String>,
    pub file_folder_count: Option<i64>,
    pub library_folder_count: Option<i64>,

    // Descriptive metadata
    pub name: Option<String>,
    pub artist: Option<String>,
    pub kind: Option<String>,
    /// File URL, percent-decoded at construction
    pub location: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i64>,
    pub release_date: Option<DateTime<Utc>>,
    pub artwork_count: Option<i64>,
    pub sort_artist: Option<String>,
    pub sort_name: Option<String>,
    pub content_rating: Option<String>,
    pub purchased: Option<bool>,
    pub has_video: Option<bool>,
    pub hd: Option<bool>,
    pub movie: Option<bool>,
    pub album_artist: Option<String>,
    pub composer: Option<String>,
    pub disc_number: Option<i64>,
    pub disc_count: Option<i64>,
    pub track_number: Option<i64>,
    pub track_count: Option<i64>,
    pub normalization: Option<i64>,
    pub sort_album: Option<String>,
    pub loved: Option<bool>,
    pub compilation: Option<bool>,
    pub sort_album_artist: Option<String>,

    // Video, episodes and remaining flags
    pub series: Option<String>,
    pub episode_order: Option<i64>,
    pub tv_show: Option<bool>,
    pub protected: Option<bool>,
    pub video_width: Option<i64>,
    pub video_height: Option<i64>,
    pub season: Option<i64>,
    pub bpm: Option<i64>,
    pub podcast: Option<bool>,
    pub unplayed: Option<bool>,
    pub comments: Option<String>,
    pub part_of_gapless_album: Option<bool>,
    pub work: Option<String>,
    pub clean: Option<bool>,
    pub explicit: Option<bool>,
    pub sort_composer: Option<String>,

    /// Attributes outside the known schema, kept as decoded
    pub extra: BTreeMap<String, Value>,
}

impl Track {
    /// Build a track from its decoded attribute map.
    ///
    /// `attrs` holds only schema keys; anything else belongs in `extra`.
    pub(crate) fn from_attrs(mut attrs: AttrMap, extra: AttrMap) -> Result<Track, LibraryError> {
        let track_id = take_i64(&mut attrs, "Track ID").ok_or(LibraryError::MissingTrackId)?;

        let location = take_string(&mut attrs, "Location").map(|url| percent_decode(&url));

        Ok(Track {
            track_id,
            size: take_i64(&mut attrs, "Size"),
            total_time: take_i64(&mut attrs, "Total Time"),
            date_modified: take_date(&mut attrs, "Date Modified"),
            date_added: take_date(&mut attrs, "Date Added"),
            bit_rate: take_i64(&mut attrs, "Bit Rate"),
            sample_rate: take_i64(&mut attrs, "Sample Rate"),
            play_count: take_i64(&mut attrs, "Play Count"),
            play_date: take_i64(&mut attrs, "Play Date"),
            play_date_utc: take_date(&mut attrs, "Play Date UTC"),
            skip_count: take_i64(&mut attrs, "Skip Count"),
            skip_date: take_date(&mut attrs, "Skip Date"),
            rating: take_i64(&mut attrs, "Rating"),
            album_rating: take_i64(&mut attrs, "Album Rating"),
            persistent_id: take_string(&mut attrs, "Persistent ID"),
            track_type: take_string(&mut attrs, "Track Type"),
            file_folder_count: take_i64(&mut attrs, "File Folder Count"),
            library_folder_count: take_i64(&mut attrs, "Library Folder Count"),
            name: take_string(&mut attrs, "Name"),
            artist: take_string(&mut attrs, "Artist"),
            kind: take_string(&mut attrs, "Kind"),
            location,
            album: take_string(&mut attrs, "Album"),
            genre: take_string(&mut attrs, "Genre"),
            year: take_i64(&mut attrs, "Year"),
            release_date: take_date(&mut attrs, "Release Date"),
            artwork_count: take_i64(&mut attrs, "Artwork Count"),
            sort_artist: take_string(&mut attrs, "Sort Artist"),
            sort_name: take_string(&mut attrs, "Sort Name"),
            content_rating: take_string(&mut attrs, "Content Rating"),
            purchased: take_bool(&mut attrs, "Purchased"),
            has_video: take_bool(&mut attrs, "Has Video"),
            hd: take_bool(&mut attrs, "HD"),
            movie: take_bool(&mut attrs, "Movie"),
            album_artist: take_string(&mut attrs, "Album Artist"),
            composer: take_string(&mut attrs, "Composer"),
            disc_number: take_i64(&mut attrs, "Disc Number"),
            disc_count: take_i64(&mut attrs, "Disc Count"),
            track_number: take_i64(&mut attrs, "Track Number"),
            track_count: take_i64(&mut attrs, "Track Count"),
            normalization: take_i64(&mut attrs, "Normalization"),
            sort_album: take_string(&mut attrs, "Sort Album"),
            loved: take_bool(&mut attrs, "Loved"),
            compilation: take_bool(&mut attrs, "Compilation"),
            sort_album_artist: take_string(&mut attrs, "Sort Album Artist"),
            series: take_string(&mut attrs, "Series"),
            episode_order: take_i64(&mut attrs, "Episode Order"),
            tv_show: take_bool(&mut attrs, "TV Show"),
            protected: take_bool(&mut attrs, "Protected"),
            video_width: take_i64(&mut attrs, "Video Width"),
            video_height: take_i64(&mut attrs, "Video Height"),
            season: take_i64(&mut attrs, "Season"),
            bpm: take_i64(&mut attrs, "BPM"),
            podcast: take_bool(&mut attrs, "Podcast"),
            unplayed: take_bool(&mut attrs, "Unplayed"),
            comments: take_string(&mut attrs, "Comments"),
            part_of_gapless_album: take_bool(&mut attrs, "Part Of Gapless Album"),
            work: take_string(&mut attrs, "Work"),
            clean: take_bool(&mut attrs, "Clean"),
            explicit: take_bool(&mut attrs, "Explicit"),
            sort_composer: take_string(&mut attrs, "Sort Composer"),
            extra,
        })
    }

    /// Classify this track into its single media category.
    ///
    /// Precedence: audiobook (an `Audiobooks` segment in the decoded
    /// location) over the movie, podcast and tv-show flags, with song as
    /// the default.
    pub fn media_kind(&self) -> MediaKind {
        let in_audiobooks = self
            .location
            .as_deref()
            .is_some_and(|loc| loc.split('/').any(|segment| segment == "Audiobooks"));

        if in_audiobooks {
            MediaKind::Audiobook
        } else if self.movie == Some(true) {
            MediaKind::Movie
        } else if self.podcast == Some(true) {
            MediaKind::Podcast
        } else if self.tv_show == Some(true) {
            MediaKind::TvShow
        } else {
            MediaKind::Song
        }
    }

    /// Serialize to a generic mapping keyed by the plist attribute names.
    ///
    /// Only attributes with a decoded value appear; extra attributes are
    /// always included.
    pub fn as_mapping(&self) -> Mapping {
        let mut map = Mapping::new();

        put_i64(&mut map, "Track ID", Some(self.track_id));
        put_i64(&mut map, "Size", self.size);
        put_i64(&mut map, "Total Time", self.total_time);
        put_date(&mut map, "Date Modified", self.date_modified);
        put_date(&mut map, "Date Added", self.date_added);
        put_i64(&mut map, "Bit Rate", self.bit_rate);
        put_i64(&mut map, "Sample Rate", self.sample_rate);
        put_i64(&mut map, "Play Count", self.play_count);
        put_i64(&mut map, "Play Date", self.play_date);
        put_date(&mut map, "Play Date UTC", self.play_date_utc);
        put_i64(&mut map, "Skip Count", self.skip_count);
        put_date(&mut map, "Skip Date", self.skip_date);
        put_i64(&mut map, "Rating", self.rating);
        put_i64(&mut map, "Album Rating", self.album_rating);
        put_str(&mut map, "Persistent ID", self.persistent_id.as_deref());
        put_str(&mut map, "Track Type", self.track_type.as_deref());
        put_i64(&mut map, "File Folder Count", self.file_folder_count);
        put_i64(&mut map, "Library Folder Count", self.library_folder_count);
        put_str(&mut map, "Name", self.name.as_deref());
        put_str(&mut map, "Artist", self.artist.as_deref());
        put_str(&mut map, "Kind", self.kind.as_deref());
        put_str(&mut map, "Location", self.location.as_deref());
        put_str(&mut map, "Album", self.album.as_deref());
        put_str(&mut map, "Genre", self.genre.as_deref());
        put_i64(&mut map, "Year", self.year);
        put_date(&mut map, "Release Date", self.release_date);
        put_i64(&mut map, "Artwork Count", self.artwork_count);
        put_str(&mut map, "Sort Artist", self.sort_artist.as_deref());
        put_str(&mut map, "Sort Name", self.sort_name.as_deref());
        put_str(&mut map, "Content Rating", self.content_rating.as_deref());
        put_bool(&mut map, "Purchased", self.purchased);
        put_bool(&mut map, "Has Video", self.has_video);
        put_bool(&mut map, "HD", self.hd);
        put_bool(&mut map, "Movie", self.movie);
        put_str(&mut map, "Album Artist", self.album_artist.as_deref());
        put_str(&mut map, "Composer", self.composer.as_deref());
        put_i64(&mut map, "Disc Number", self.disc_number);
        put_i64(&mut map, "Disc Count", self.disc_count);
        put_i64(&mut map, "Track Number", self.track_number);
        put_i64(&mut map, "Track Count", self.track_count);
        put_i64(&mut map, "Normalization", self.normalization);
        put_str(&mut map, "Sort Album", self.sort_album.as_deref());
        put_bool(&mut map, "Loved", self.loved);
        put_bool(&mut map, "Compilation", self.compilation);
        put_str(&mut map, "Sort Album Artist", self.sort_album_artist.as_deref());
        put_str(&mut map, "Series", self.series.as_deref());
        put_i64(&mut map, "Episode Order", self.episode_order);
        put_bool(&mut map, "TV Show", self.tv_show);
        put_bool(&mut map, "Protected", self.protected);
        put_i64(&mut map, "Video Width", self.video_width);
        put_i64(&mut map, "Video Height", self.video_height);
        put_i64(&mut map, "Season", self.season);
        put_i64(&mut map, "BPM", self.bpm);
        put_bool(&mut map, "Podcast", self.podcast);
        put_bool(&mut map, "Unplayed", self.unplayed);
        put_str(&mut map, "Comments", self.comments.as_deref());
        put_bool(&mut map, "Part Of Gapless Album", self.part_of_gapless_album);
        put_str(&mut map, "Work", self.work.as_deref());
        put_bool(&mut map, "Clean", self.clean);
        put_bool(&mut map, "Explicit", self.explicit);
        put_str(&mut map, "Sort Composer", self.sort_composer.as_deref());

        for (key, value) in &self.extra {
            map.insert(key.clone(), value.to_json());
        }

        map
    }
}

fn percent_decode(url: &str) -> String {
    urlencoding::decode(url)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| url.to_string())
}
