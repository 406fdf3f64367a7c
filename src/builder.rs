//! Library builder
//!
//! One synchronous pass over an already-materialized plist tree: tracks
//! first (populating the id index and category lists), then playlists
//! (resolving member ids against the track index), then display paths
//! (which need every playlist in place before parent links are followed).

use crate::error::LibraryError;
use crate::model::{AttrMap, Library, Playlist, Track};
use crate::plist::{decode_value, XmlNode};
use crate::schema;
use std::collections::BTreeSet;

/// Non-fatal findings from one build pass.
///
/// Collected per build rather than in process-wide state, so repeated
/// parses never share anything.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    unhandled_keys: BTreeSet<String>,
    unexpected_tags: Vec<String>,
}

impl Diagnostics {
    /// Attribute keys outside the known schema, deduplicated
    pub fn unhandled_keys(&self) -> &BTreeSet<String> {
        &self.unhandled_keys
    }

    /// Notes about value tags the attribute mapper did not recognize
    pub fn unexpected_tags(&self) -> &[String] {
        &self.unexpected_tags
    }

    pub(crate) fn note_unhandled_key(&mut self, key: &str) {
        self.unhandled_keys.insert(key.to_string());
    }

    pub(crate) fn note_unexpected_tag(&mut self, key: &str, tag: &str) {
        log::debug!("unexpected value tag <{}> for attribute {:?}", tag, key);
        self.unexpected_tags.push(format!("{key}: <{tag}>"));
    }

    /// Surface the unhandled-key set once, at the end of the pass
    fn report(&self) {
        if !self.unhandled_keys.is_empty() {
            log::warn!("unhandled attribute keys: {:?}", self.unhandled_keys);
        }
    }
}

/// Build a [`Library`] from the root `<plist>` node
pub(crate) fn build(root: &XmlNode) -> Result<Library, LibraryError> {
    let mut builder = LibraryBuilder {
        library: Library::new(),
        diagnostics: Diagnostics::default(),
    };
    builder.run(root)?;
    Ok(builder.finish())
}

struct LibraryBuilder {
    library: Library,
    diagnostics: Diagnostics,
}

impl LibraryBuilder {
    fn run(&mut self, root: &XmlNode) -> Result<(), LibraryError> {
        // The export's shape is fixed: one top-level dict whose first
        // dict child is the tracks section and first array child the
        // playlists section. No structural search beyond that.
        let top = root
            .first_child("dict")
            .ok_or(LibraryError::MissingSection("top-level dict"))?;
        let tracks = top
            .first_child("dict")
            .ok_or(LibraryError::MissingSection("tracks dict"))?;
        let playlists = top
            .first_child("array")
            .ok_or(LibraryError::MissingSection("playlists array"))?;

        self.read_tracks(tracks)?;
        self.read_playlists(playlists)?;
        self.assign_display_paths()?;
        Ok(())
    }

    fn finish(self) -> Library {
        self.diagnostics.report();
        log::info!(
            "Parsed library: {} tracks, {} playlists",
            self.library.track_count(),
            self.library.playlist_count()
        );

        let mut library = self.library;
        library.set_diagnostics(self.diagnostics);
        library
    }

    fn read_tracks(&mut self, section: &XmlNode) -> Result<(), LibraryError> {
        // Children alternate <key>id</key><dict>attributes</dict>; the id
        // repeats inside the dict as "Track ID", so only dicts matter here
        for entry in &section.children {
            if entry.tag == "dict" {
                let track = self.read_track(entry)?;
                self.library.insert_track(track);
            }
        }

        log::debug!("tracks section done: {} tracks", self.library.track_count());
        Ok(())
    }

    fn read_track(&mut self, entry: &XmlNode) -> Result<Track, LibraryError> {
        let mut known = AttrMap::new();
        let mut extra = AttrMap::new();

        for (key, value_node) in pairs(entry, "track")? {
            let is_known = schema::is_track_attribute(key);
            if !is_known {
                self.diagnostics.note_unhandled_key(key);
            }

            let Some(value) = decode_value(key, value_node, &mut self.diagnostics)? else {
                continue;
            };
            if is_known {
                known.insert(key.to_string(), value);
            } else {
                extra.insert(key.to_string(), value);
            }
        }

        Track::from_attrs(known, extra)
    }

    fn read_playlists(&mut self, section: &XmlNode) -> Result<(), LibraryError> {
        for entry in &section.children {
            if entry.tag == "dict" {
                let playlist = self.read_playlist(entry)?;
                self.library.insert_playlist(playlist);
            }
        }

        log::debug!(
            "playlists section done: {} playlists",
            self.library.playlist_count()
        );
        Ok(())
    }

    fn read_playlist(&mut self, entry: &XmlNode) -> Result<Playlist, LibraryError> {
        // Name is pulled up front so lookup failures can say which
        // playlist they came from
        let name = playlist_name(entry);

        let mut known = AttrMap::new();
        let mut extra = AttrMap::new();
        let mut items = Vec::new();

        for (key, value_node) in pairs(entry, "playlist")? {
            if key == "Playlist Items" {
                items = self.read_items(value_node, &name)?;
                continue;
            }

            let is_known = schema::is_playlist_attribute(key);
            if !is_known {
                self.diagnostics.note_unhandled_key(key);
            }

            let Some(value) = decode_value(key, value_node, &mut self.diagnostics)? else {
                continue;
            };
            if is_known {
                known.insert(key.to_string(), value);
            } else {
                extra.insert(key.to_string(), value);
            }
        }

        // Every member must resolve; a dangling reference aborts the parse
        for id in &items {
            if self.library.track_by_id(*id).is_none() {
                return Err(LibraryError::UnknownTrackId {
                    playlist: name.clone(),
                    track_id: *id,
                });
            }
        }

        Playlist::from_attrs(known, extra, items)
    }

    /// Collect member track ids from a "Playlist Items" array.
    ///
    /// Each entry must be a dict holding exactly one (Track ID, integer)
    /// pair. Source order and duplicates are preserved.
    fn read_items(&self, section: &XmlNode, playlist: &str) -> Result<Vec<i64>, LibraryError> {
        let malformed = || LibraryError::MalformedPlaylistItem {
            playlist: playlist.to_string(),
        };

        let mut ids = Vec::with_capacity(section.children.len());
        for item in &section.children {
            if item.tag != "dict" || item.children.len() != 2 {
                return Err(malformed());
            }

            let key = &item.children[0];
            let value = &item.children[1];
            if key.tag != "key" || key.text_str() != Some("Track ID") || value.tag != "integer" {
                return Err(malformed());
            }

            let id = value
                .text_str()
                .and_then(|text| text.trim().parse::<i64>().ok())
                .ok_or_else(malformed)?;
            ids.push(id);
        }

        Ok(ids)
    }

    /// Compute `/folder/.../name` paths once every playlist is indexed
    fn assign_display_paths(&mut self) -> Result<(), LibraryError> {
        let mut paths = Vec::with_capacity(self.library.playlist_count());

        for playlist in self.library.playlists() {
            let mut path = format!("/{}", playlist.name_str());
            let mut parent_id = non_empty(playlist.parent_persistent_id.clone());

            while let Some(id) = parent_id {
                let parent = self.library.playlist_by_persistent_id(&id).ok_or_else(|| {
                    LibraryError::UnknownParent {
                        playlist: playlist.name_str().to_string(),
                        parent_id: id.clone(),
                    }
                })?;
                path = format!("/{}{}", parent.name_str(), path);
                parent_id = non_empty(parent.parent_persistent_id.clone());
            }

            paths.push(path);
        }

        for (playlist, path) in self.library.playlists_mut().iter_mut().zip(paths) {
            playlist.display_path = path;
        }
        Ok(())
    }
}

/// Iterate a dict node as (key name, value node) pairs.
///
/// An odd child count or a non-`key` node in key position is malformed.
fn pairs<'a>(
    entry: &'a XmlNode,
    context: &'static str,
) -> Result<impl Iterator<Item = (&'a str, &'a XmlNode)>, LibraryError> {
    if entry.children.len() % 2 != 0 {
        return Err(LibraryError::MalformedEntry { context });
    }
    for pair in entry.children.chunks_exact(2) {
        if pair[0].tag != "key" {
            return Err(LibraryError::MalformedEntry { context });
        }
    }

    Ok(entry
        .children
        .chunks_exact(2)
        .map(|pair| (pair[0].text_str().unwrap_or_default(), &pair[1])))
}

/// Peek a playlist's name ahead of full decoding, for error context
fn playlist_name(entry: &XmlNode) -> String {
    entry
        .children
        .chunks_exact(2)
        .find(|pair| pair[0].tag == "key" && pair[0].text_str() == Some("Name"))
        .and_then(|pair| pair[1].text.clone())
        .unwrap_or_default()
}

/// Treat a missing and an empty parent id the same: root level
fn non_empty(id: Option<String>) -> Option<String> {
    id.filter(|s| !s.is_empty())
}
