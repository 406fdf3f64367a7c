use super::{AttrMap, Library, Mapping};
use super::{put_bool, put_i64, put_str};
use super::{take_bool, take_i64, take_string};
use crate::error::LibraryError;
use crate::plist::Value;
use crate::schema::distinguished_kind_label;
use serde::Serialize;
use std::collections::BTreeMap;

/// A playlist (or playlist folder) from the library export.
///
/// Items are stored as track identifiers; the owning [`Library`] resolves
/// them to tracks, and ingestion guarantees each one resolves.
#[derive(Debug, Clone, Serialize)]
pub struct Playlist {
    pub name: Option<String>,
    pub master: Option<bool>,
    pub playlist_id: Option<i64>,

    /// Stable identifier, unique within one library
    pub playlist_persistent_id: String,

    /// Persistent id of the enclosing folder; `None` means root level
    pub parent_persistent_id: Option<String>,

    /// Numeric code marking a built-in system playlist
    pub distinguished_kind: Option<i64>,

    pub music: Option<bool>,
    pub movies: Option<bool>,
    pub tv_shows: Option<bool>,
    pub podcasts: Option<bool>,
    pub audiobooks: Option<bool>,
    pub visible: Option<bool>,
    pub all_items: Option<bool>,
    pub folder: Option<bool>,
    pub smart_info: Option<String>,
    pub smart_criteria: Option<String>,

    /// Attributes outside the known schema, kept as decoded
    pub extra: BTreeMap<String, Value>,

    /// Member track ids in source order; a track may appear more than once
    pub items: Vec<i64>,

    /// Full folder path from the root to this playlist, `/<folder>/<name>`,
    /// assigned once all playlists are built
    pub display_path: String,
}

impl Playlist {
    /// Build a playlist from its decoded attribute map and collected items
    pub(crate) fn from_attrs(
        mut attrs: AttrMap,
        extra: AttrMap,
        items: Vec<i64>,
    ) -> Result<Playlist, LibraryError> {
        let name = take_string(&mut attrs, "Name");
        let playlist_persistent_id = take_string(&mut attrs, "Playlist Persistent ID")
            .ok_or_else(|| LibraryError::MissingPlaylistId {
                name: name.clone().unwrap_or_default(),
            })?;

        Ok(Playlist {
            name,
            master: take_bool(&mut attrs, "Master"),
            playlist_id: take_i64(&mut attrs, "Playlist ID"),
            playlist_persistent_id,
            parent_persistent_id: take_string(&mut attrs, "Parent Persistent ID"),
            distinguished_kind: take_i64(&mut attrs, "Distinguished Kind"),
            music: take_bool(&mut attrs, "Music"),
            movies: take_bool(&mut attrs, "Movies"),
            tv_shows: take_bool(&mut attrs, "TV Shows"),
            podcasts: take_bool(&mut attrs, "Podcasts"),
            audiobooks: take_bool(&mut attrs, "Audiobooks"),
            visible: take_bool(&mut attrs, "Visible"),
            all_items: take_bool(&mut attrs, "All Items"),
            folder: take_bool(&mut attrs, "Folder"),
            smart_info: take_string(&mut attrs, "Smart Info"),
            smart_criteria: take_string(&mut attrs, "Smart Criteria"),
            extra,
            items,
            display_path: String::new(),
        })
    }

    /// Display name, empty for the rare unnamed playlist
    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Number of member tracks, duplicates included
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serialize to a generic mapping keyed by the plist attribute names.
    ///
    /// Linked tracks are included recursively under `"tracks"`. With
    /// `translate_kind`, a known `Distinguished Kind` code is replaced by
    /// its label.
    pub fn as_mapping(&self, library: &Library, translate_kind: bool) -> Mapping {
        let mut map = Mapping::new();

        put_str(&mut map, "Name", self.name.as_deref());
        put_bool(&mut map, "Master", self.master);
        put_i64(&mut map, "Playlist ID", self.playlist_id);
        put_str(
            &mut map,
            "Playlist Persistent ID",
            Some(&self.playlist_persistent_id),
        );
        put_str(
            &mut map,
            "Parent Persistent ID",
            self.parent_persistent_id.as_deref(),
        );

        match (translate_kind, self.distinguished_kind) {
            (true, Some(kind)) => match distinguished_kind_label(kind) {
                Some(label) => put_str(&mut map, "Distinguished Kind", Some(label)),
                None => put_i64(&mut map, "Distinguished Kind", Some(kind)),
            },
            (false, kind) => put_i64(&mut map, "Distinguished Kind", kind),
            (true, None) => {}
        }

        put_bool(&mut map, "Music", self.music);
        put_bool(&mut map, "Movies", self.movies);
        put_bool(&mut map, "TV Shows", self.tv_shows);
        put_bool(&mut map, "Podcasts", self.podcasts);
        put_bool(&mut map, "Audiobooks", self.audiobooks);
        put_bool(&mut map, "Visible", self.visible);
        put_bool(&mut map, "All Items", self.all_items);
        put_bool(&mut map, "Folder", self.folder);
        put_str(&mut map, "Smart Info", self.smart_info.as_deref());
        put_str(&mut map, "Smart Criteria", self.smart_criteria.as_deref());

        for (key, value) in &self.extra {
            map.insert(key.clone(), value.to_json());
        }

        let tracks: Vec<serde_json::Value> = self
            .items
            .iter()
            .filter_map(|id| library.track_by_id(*id))
            .map(|track| serde_json::Value::Object(track.as_mapping()))
            .collect();
        map.insert("tracks".to_string(), serde_json::Value::Array(tracks));

        map
    }
}
