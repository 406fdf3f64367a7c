//! Tagged tree node, the shape the library builder consumes

/// A single node of the parsed plist tree.
///
/// Dictionaries carry their entries as alternating `key`/value children,
/// exactly as they appear in the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    /// Element name (`dict`, `array`, `key`, `string`, `integer`, ...)
    pub tag: String,

    /// Text content, if the element had any
    pub text: Option<String>,

    /// Child elements in document order
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create an empty node with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// First child with the given tag, in document order
    pub fn first_child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Text content as a borrowed str
    pub fn text_str(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
