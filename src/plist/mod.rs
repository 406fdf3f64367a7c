//! Generic plist attribute tree
//!
//! A property-list export is a tree of tagged nodes (`dict`, `array`,
//! `key`, `string`, `integer`, `date`, ...). This module materializes
//! that tree from XML and maps individual value nodes to typed scalars;
//! it knows nothing about tracks or playlists.

mod node;
mod reader;
mod value;

pub use node::XmlNode;
pub use reader::{read_plist, read_plist_file, read_plist_str};
pub use value::{decode_value, Value};
