//! Data model for one parsed library export
//!
//! Records are built once during ingestion and read-only afterwards.
//! Attribute decoding produces a name -> [`Value`] map validated against
//! the static schema; the constructors here transform that map into the
//! typed records.

mod library;
mod playlist;
mod track;

pub use library::Library;
pub use playlist::Playlist;
pub use track::{MediaKind, Track};

use crate::plist::Value;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Decoded attributes keyed by their plist key name
pub(crate) type AttrMap = BTreeMap<String, Value>;

pub(crate) fn take_i64(attrs: &mut AttrMap, key: &str) -> Option<i64> {
    attrs.remove(key).and_then(Value::into_i64)
}

pub(crate) fn take_bool(attrs: &mut AttrMap, key: &str) -> Option<bool> {
    attrs.remove(key).and_then(Value::into_bool)
}

pub(crate) fn take_string(attrs: &mut AttrMap, key: &str) -> Option<String> {
    attrs.remove(key).and_then(Value::into_string)
}

pub(crate) fn take_date(attrs: &mut AttrMap, key: &str) -> Option<DateTime<Utc>> {
    attrs.remove(key).and_then(Value::into_date)
}

// Mapping helpers: absent fields are omitted, never emitted as null.

pub(crate) type Mapping = serde_json::Map<String, serde_json::Value>;

pub(crate) fn put_i64(map: &mut Mapping, key: &str, value: Option<i64>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v.into());
    }
}

pub(crate) fn put_bool(map: &mut Mapping, key: &str, value: Option<bool>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v.into());
    }
}

pub(crate) fn put_str(map: &mut Mapping, key: &str, value: Option<&str>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v.into());
    }
}

pub(crate) fn put_date(map: &mut Mapping, key: &str, value: Option<DateTime<Utc>>) {
    if let Some(v) = value {
        map.insert(
            key.to_string(),
            v.format("%Y-%m-%dT%H:%M:%SZ").to_string().into(),
        );
    }
}
