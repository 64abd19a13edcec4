//! A minimal read-only XML element tree, built from `xml-rs` events.

use crate::error::{Error, Result};

use xml::reader::{EventReader, XmlEvent};
use xml::ParserConfig;

/// Elements nested deeper than this are rejected while parsing and unmarshalling.
///
/// Leaves room for the document envelope on top of [`MAX_VALUE_DEPTH`] containers, so every
/// document the marshaller accepts can be read back.
///
/// [`MAX_VALUE_DEPTH`]: constant.MAX_VALUE_DEPTH.html
pub const MAX_ELEMENT_DEPTH: usize = 4 * crate::ser::MAX_VALUE_DEPTH;

/// An XML element: its local name, its own character data, and its child elements.
///
/// Attributes, comments and processing instructions are dropped. The text is everything that
/// appears directly inside the element (entities already decoded), untrimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    name: String,
    text: String,
    children: Vec<Node>,
}

impl Node {
    /// Parses an XML document and returns its root element.
    ///
    /// # Errors
    ///
    /// * `Error::MalformedXml` if the document is not well-formed.
    /// * `Error::UnexpectedXml` if it has no root element.
    /// * `Error::DepthExceeded` if elements nest deeper than [`MAX_ELEMENT_DEPTH`].
    ///
    /// [`MAX_ELEMENT_DEPTH`]: constant.MAX_ELEMENT_DEPTH.html
    pub fn parse(xml: &str) -> Result<Node> {
        let config = ParserConfig::new().cdata_to_characters(true);
        let reader = EventReader::new_with_config(xml.as_bytes(), config);

        // open elements, innermost last
        let mut stack: Vec<Node> = Vec::new();
        let mut root = None;

        for event in reader {
            match event? {
                XmlEvent::StartElement { name, .. } => {
                    if stack.len() >= MAX_ELEMENT_DEPTH {
                        return Err(Error::DepthExceeded { limit: MAX_ELEMENT_DEPTH });
                    }
                    stack.push(Node {
                        name: name.local_name,
                        ..Node::default()
                    });
                }
                XmlEvent::EndElement { .. } => {
                    // xml-rs guarantees balanced tags
                    if let Some(node) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(node),
                            None => root = Some(node),
                        }
                    }
                }
                XmlEvent::Characters(text) | XmlEvent::CData(text) | XmlEvent::Whitespace(text) => {
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&text);
                    }
                }
                // prolog, comments, processing instructions
                _ => {}
            }
        }

        root.ok_or_else(|| Error::unexpected("a root element", None))
    }

    /// The element's local name, without any namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the element's local name is `name`, ignoring ASCII case.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// The character data directly inside this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}
