use super::{MediaKind, Playlist, Track};
use crate::builder::{self, Diagnostics};
use crate::error::LibraryError;
use crate::plist::{read_plist_file, XmlNode};
use std::collections::HashMap;
use std::path::Path;

/// One parsed library: every track and playlist from a single export.
///
/// Built in a single pass and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Library {
    /// All tracks indexed by their numeric id
    tracks: HashMap<i64, Track>,

    /// Track ids per media category, in ingestion order; together these
    /// partition the track index
    by_kind: HashMap<MediaKind, Vec<i64>>,

    /// All playlists in source order
    playlists: Vec<Playlist>,

    /// Playlist persistent id -> position in `playlists`
    playlist_index: HashMap<String, usize>,

    /// Unknown-attribute diagnostics collected during the build
    diagnostics: Diagnostics,
}

impl Library {
    /// Build a library from an already-parsed plist tree.
    ///
    /// The root must be the `<plist>` element: its first `dict` child is
    /// the top-level dictionary, holding the tracks `dict` and the
    /// playlists `array`.
    pub fn from_tree(root: &XmlNode) -> Result<Library, LibraryError> {
        builder::build(root)
    }

    /// Read and build a library from an XML export on disk
    pub fn from_file(path: &Path) -> Result<Library, LibraryError> {
        log::info!("Parsing library export from {:?}", path);
        let tree = read_plist_file(path)?;
        Self::from_tree(&tree)
    }

    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert a track into the id index and its category list
    pub(crate) fn insert_track(&mut self, track: Track) {
        let kind = track.media_kind();
        self.by_kind.entry(kind).or_default().push(track.track_id);
        self.tracks.insert(track.track_id, track);
    }

    /// Insert a playlist, indexing it by persistent id
    pub(crate) fn insert_playlist(&mut self, playlist: Playlist) {
        self.playlist_index
            .insert(playlist.playlist_persistent_id.clone(), self.playlists.len());
        self.playlists.push(playlist);
    }

    pub(crate) fn playlists_mut(&mut self) -> &mut [Playlist] {
        &mut self.playlists
    }

    pub(crate) fn set_diagnostics(&mut self, diagnostics: Diagnostics) {
        self.diagnostics = diagnostics;
    }

    /// Get a track by its numeric id
    pub fn track_by_id(&self, id: i64) -> Option<&Track> {
        self.tracks.get(&id)
    }

    /// All tracks, in no particular order
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// All playlists, in source order
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn playlist_count(&self) -> usize {
        self.playlists.len()
    }

    /// Look up a playlist by its persistent id
    pub fn playlist_by_persistent_id(&self, id: &str) -> Option<&Playlist> {
        self.playlist_index.get(id).map(|&i| &self.playlists[i])
    }

    /// Look up a playlist by name (first match in source order)
    pub fn playlist_by_name(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name_str() == name)
    }

    /// Tracks of one media category, in ingestion order
    pub fn tracks_in(&self, kind: MediaKind) -> Vec<&Track> {
        self.by_kind
            .get(&kind)
            .map(|ids| ids.iter().filter_map(|id| self.tracks.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn songs(&self) -> Vec<&Track> {
        self.tracks_in(MediaKind::Song)
    }

    pub fn movies(&self) -> Vec<&Track> {
        self.tracks_in(MediaKind::Movie)
    }

    pub fn podcasts(&self) -> Vec<&Track> {
        self.tracks_in(MediaKind::Podcast)
    }

    pub fn tv_shows(&self) -> Vec<&Track> {
        self.tracks_in(MediaKind::TvShow)
    }

    pub fn audiobooks(&self) -> Vec<&Track> {
        self.tracks_in(MediaKind::Audiobook)
    }

    /// Ordered tracks of the playlist with the given persistent id or name.
    ///
    /// Duplicate members come back as many times as they appear.
    pub fn get_playlist_contents(&self, id_or_name: &str) -> Result<Vec<&Track>, LibraryError> {
        let playlist = self
            .playlist_by_persistent_id(id_or_name)
            .or_else(|| self.playlist_by_name(id_or_name))
            .ok_or_else(|| LibraryError::UnknownPlaylist(id_or_name.to_string()))?;

        Ok(playlist
            .items
            .iter()
            .filter_map(|id| self.tracks.get(id))
            .collect())
    }

    /// Diagnostics collected while this library was built
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttrMap;
    use crate::plist::Value;

    fn track(id: i64, attrs: &[(&str, Value)]) -> Track {
        let mut map = AttrMap::new();
        map.insert("Track ID".to_string(), Value::Int(id));
        for (k, v) in attrs {
            map.insert(k.to_string(), v.clone());
        }
        Track::from_attrs(map, AttrMap::new()).unwrap()
    }

    fn playlist(name: &str, persistent_id: &str, items: Vec<i64>) -> Playlist {
        let mut map = AttrMap::new();
        map.insert("Name".to_string(), Value::Str(name.to_string()));
        map.insert(
            "Playlist Persistent ID".to_string(),
            Value::Str(persistent_id.to_string()),
        );
        Playlist::from_attrs(map, AttrMap::new(), items).unwrap()
    }

    #[test]
    fn test_empty_library() {
        let lib = Library::new();
        assert_eq!(lib.track_count(), 0);
        assert_eq!(lib.playlist_count(), 0);
        assert!(lib.songs().is_empty());
    }

    #[test]
    fn test_insert_track_indexes_by_id_and_category() {
        let mut lib = Library::new();
        lib.insert_track(track(10, &[]));
        lib.insert_track(track(11, &[("Podcast", Value::Bool(true))]));

        assert_eq!(lib.track_count(), 2);
        assert!(lib.track_by_id(10).is_some());
        assert_eq!(lib.songs().len(), 1);
        assert_eq!(lib.podcasts().len(), 1);
        assert!(lib.movies().is_empty());
    }

    #[test]
    fn test_every_track_lands_in_exactly_one_category() {
        let mut lib = Library::new();
        lib.insert_track(track(1, &[]));
        lib.insert_track(track(2, &[("Movie", Value::Bool(true))]));
        lib.insert_track(track(3, &[("TV Show", Value::Bool(true))]));

        let total: usize = MediaKind::ALL
            .iter()
            .map(|kind| lib.tracks_in(*kind).len())
            .sum();
        assert_eq!(total, lib.track_count());
    }

    #[test]
    fn test_playlist_lookup_by_id_and_name() {
        let mut lib = Library::new();
        lib.insert_track(track(1, &[]));
        lib.insert_playlist(playlist("Rock", "PL001", vec![1, 1]));

        assert!(lib.playlist_by_persistent_id("PL001").is_some());
        assert!(lib.playlist_by_name("Rock").is_some());
        assert!(lib.playlist_by_name("Jazz").is_none());

        // Duplicates are preserved in playlist contents
        let contents = lib.get_playlist_contents("Rock").unwrap();
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[0].track_id, 1);

        let err = lib.get_playlist_contents("Jazz");
        assert!(matches!(err, Err(LibraryError::UnknownPlaylist(_))));
    }
}
