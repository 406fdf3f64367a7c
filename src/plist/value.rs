//! Attribute mapper: plist value node -> typed scalar
//!
//! Shared by track and playlist decoding. Tags outside the plist scalar
//! set are passed through as raw text with a diagnostic note; an empty
//! payload decodes to "no value" rather than a zero/empty default.

use crate::builder::Diagnostics;
use crate::error::LibraryError;
use crate::plist::XmlNode;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// Plist dates are always UTC in this fixed layout
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A decoded attribute value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    Date(DateTime<Utc>),
}

impl Value {
    /// Integer view; a string that parses as an integer is accepted
    pub fn into_i64(self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(n),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn into_bool(self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_date(self) -> Option<DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Convert into the JSON representation used by the mapping surface
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Str(s) => serde_json::Value::from(s.as_str()),
            Value::Date(d) => serde_json::Value::from(d.format(DATE_FORMAT).to_string()),
        }
    }
}

/// Decode one attribute's value node into a typed scalar.
///
/// `Ok(None)` means the key was present but carried no payload. Unknown
/// tags are not an error: the raw text is kept and a note is recorded on
/// the diagnostics collector.
pub fn decode_value(
    key: &str,
    node: &XmlNode,
    diagnostics: &mut Diagnostics,
) -> Result<Option<Value>, LibraryError> {
    match node.tag.as_str() {
        "true" => Ok(Some(Value::Bool(true))),
        "false" => Ok(Some(Value::Bool(false))),

        "integer" => match node.text_str() {
            None => Ok(None),
            Some(text) => {
                let n = text
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| invalid(key, node, text))?;
                Ok(Some(Value::Int(n)))
            }
        },

        "string" => Ok(node.text.clone().map(Value::Str)),

        "date" => match node.text_str() {
            None => Ok(None),
            Some(text) => {
                let naive = NaiveDateTime::parse_from_str(text.trim(), DATE_FORMAT)
                    .map_err(|_| invalid(key, node, text))?;
                Ok(Some(Value::Date(naive.and_utc())))
            }
        },

        other => {
            diagnostics.note_unexpected_tag(key, other);
            Ok(node.text.clone().map(Value::Str))
        }
    }
}

fn invalid(key: &str, node: &XmlNode, text: &str) -> LibraryError {
    LibraryError::InvalidValue {
        key: key.to_string(),
        tag: node.tag.clone(),
        text: text.to_string(),
    }
}
