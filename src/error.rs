//! Error taxonomy for library ingestion
//!
//! Structural violations abort the parse; unknown attributes never do
//! (those are collected as diagnostics instead).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to read library file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse library XML")]
    Xml(#[from] quick_xml::Error),

    #[error("library export is missing its {0} section")]
    MissingSection(&'static str),

    #[error("{context} entry is not an alternating key/value sequence")]
    MalformedEntry { context: &'static str },

    #[error("track entry has no Track ID")]
    MissingTrackId,

    #[error("playlist {name:?} has no Playlist Persistent ID")]
    MissingPlaylistId { name: String },

    #[error("playlist item in {playlist:?} is not a single Track ID pair")]
    MalformedPlaylistItem { playlist: String },

    #[error("playlist {playlist:?} references unknown track {track_id}")]
    UnknownTrackId { playlist: String, track_id: i64 },

    #[error("playlist {playlist:?} references unknown parent {parent_id:?}")]
    UnknownParent { playlist: String, parent_id: String },

    #[error("no playlist named or identified by {0:?}")]
    UnknownPlaylist(String),

    #[error("invalid {tag} payload for {key:?}: {text:?}")]
    InvalidValue {
        key: String,
        tag: String,
        text: String,
    },
}
