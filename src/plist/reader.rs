//! Plist XML reader
//!
//! Materializes the whole document into an [`XmlNode`] tree before any
//! ingestion happens. The builder never sees XML events, only the tree.

use super::node::XmlNode;
use crate::error::LibraryError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a plist document from any buffered reader.
///
/// Returns the root element (the `<plist>` node for a library export).
/// XML declarations, DOCTYPE and comments are skipped.
pub fn read_plist<R: BufRead>(input: R) -> Result<XmlNode, LibraryError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.push(XmlNode::new(tag));
            }

            Event::Empty(e) => {
                // Self-closing elements (<true/>, <false/>, <dict/>, ...)
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                attach(&mut stack, &mut root, XmlNode::new(tag));
            }

            Event::Text(e) => {
                if let Some(open) = stack.last_mut() {
                    let text = e.unescape().map_err(quick_xml::Error::from)?.into_owned();
                    match open.text {
                        Some(ref mut existing) => existing.push_str(&text),
                        None => open.text = Some(text),
                    }
                }
            }

            Event::End(_) => {
                // quick-xml validates that end tags match, so an unbalanced
                // pop here cannot happen on well-formed input
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node);
                }
            }

            Event::Eof => break,

            // Declaration, DOCTYPE, processing instructions, comments
            _ => {}
        }

        buf.clear();
    }

    root.ok_or(LibraryError::MissingSection("plist root"))
}

/// Read a plist document from a file on disk
pub fn read_plist_file(path: &Path) -> Result<XmlNode, LibraryError> {
    let file = File::open(path)?;
    read_plist(BufReader::new(file))
}

/// Read a plist document from an in-memory string
pub fn read_plist_str(input: &str) -> Result<XmlNode, LibraryError> {
    read_plist(input.as_bytes())
}

/// Attach a finished node to the innermost open element, or make it the root
fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}
