//! iTunes/Music library reader
//!
//! Parses an iTunes/Music XML export into typed track and playlist
//! records: tracks indexed by id and partitioned into media categories,
//! playlists with their members resolved and folder paths reconstructed.
//! Ingestion is read-only and one-shot; the resulting [`Library`] is an
//! immutable snapshot.

pub mod format;
pub mod model;
pub mod plist;
pub mod schema;

mod builder;
mod error;

pub use builder::Diagnostics;
pub use error::LibraryError;
pub use model::{Library, MediaKind, Playlist, Track};
