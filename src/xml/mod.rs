//! Owned XML tree used as the editable body of notification templates.
//!
//! Templates are small (a root, a `visual`, a `binding` and a handful of
//! `text`/`image` slots), so the tree is a plain recursive structure:
//! - [`XmlDocument`] owns the root [`Element`]
//! - elements keep attributes in insertion order
//! - lookups by tag name walk the tree depth-first in document order
//!
//! Parsing and serialization go through `quick-xml`. A parsed and re-serialized
//! document is equal as a tree, not as text: the XML declaration, comments and
//! indentation between elements are dropped, and childless elements are written
//! self-closed. Text inside leaf elements is kept byte for byte.

mod parse;
mod write;

use std::fmt;

use thiserror::Error;

/// XML-specific error type
#[derive(Debug, Error, Clone, PartialEq)]
pub enum XmlError {
    #[error("Malformed XML: {0}")]
    Malformed(String),

    #[error("Document has no root element")]
    Empty,

    #[error("Document has more than one root element")]
    MultipleRoots,

    #[error("Unclosed element: {0}")]
    Unclosed(String),

    #[error("Failed to write XML: {0}")]
    Write(String),
}

impl XmlError {
    pub(crate) fn malformed(err: impl fmt::Display) -> Self {
        Self::Malformed(err.to_string())
    }

    pub(crate) fn write(err: impl fmt::Display) -> Self {
        Self::Write(err.to_string())
    }
}

/// A child of an element
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

/// An XML element with ordered attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder-style child appender
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set an attribute, replacing any existing value in place
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(k, _)| k == key)?;
        Some(self.attributes.remove(index).1)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn last_child(&self) -> Option<&Node> {
        self.children.last()
    }

    pub fn append_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Detach the first direct child element named `name`
    pub fn take_child_element(&mut self, name: &str) -> Option<Element> {
        let index = self
            .children
            .iter()
            .position(|child| matches!(child, Node::Element(e) if e.name == name))?;
        match self.children.remove(index) {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text content of this element and its descendants
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    fn count_named(&self, name: &str) -> usize {
        let own = usize::from(self.name == name);
        own + self
            .child_elements()
            .map(|child| child.count_named(name))
            .sum::<usize>()
    }

    fn find_nth<'a>(&'a self, name: &str, remaining: &mut usize) -> Option<&'a Element> {
        if self.name == name {
            if *remaining == 0 {
                return Some(self);
            }
            *remaining -= 1;
        }
        self.child_elements()
            .find_map(|child| child.find_nth(name, remaining))
    }

    fn find_nth_mut<'a>(&'a mut self, name: &str, remaining: &mut usize) -> Option<&'a mut Element> {
        if self.name == name {
            if *remaining == 0 {
                return Some(self);
            }
            *remaining -= 1;
        }
        for child in self.children.iter_mut() {
            if let Node::Element(element) = child {
                if let Some(found) = element.find_nth_mut(name, remaining) {
                    return Some(found);
                }
            }
        }
        None
    }
}

/// A parsed XML document
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: Element,
}

impl XmlDocument {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Parse XML text. Declarations, comments and processing instructions are dropped;
    /// whitespace-only text between elements is ignored.
    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        parse::parse_document(xml).map(Self::new)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Number of elements named `name`, the root included
    pub fn count_elements(&self, name: &str) -> usize {
        self.root.count_named(name)
    }

    /// The `index`-th element named `name` in document order
    pub fn element(&self, name: &str, index: usize) -> Option<&Element> {
        let mut remaining = index;
        self.root.find_nth(name, &mut remaining)
    }

    pub fn element_mut(&mut self, name: &str, index: usize) -> Option<&mut Element> {
        let mut remaining = index;
        self.root.find_nth_mut(name, &mut remaining)
    }
}

impl fmt::Display for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = write::write_document(self).map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> XmlDocument {
        XmlDocument::parse(
            r#"<tile><visual><binding template="T"><image id="1" src=""/><text id="1"/><text id="2"/></binding></visual></tile>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_count_elements() {
        let doc = sample();
        assert_eq!(doc.count_elements("text"), 2);
        assert_eq!(doc.count_elements("image"), 1);
        assert_eq!(doc.count_elements("tile"), 1);
        assert_eq!(doc.count_elements("audio"), 0);
    }

    #[test]
    fn test_element_lookup_in_document_order() {
        let doc = sample();
        assert_eq!(doc.element("text", 0).unwrap().attribute("id"), Some("1"));
        assert_eq!(doc.element("text", 1).unwrap().attribute("id"), Some("2"));
        assert!(doc.element("text", 2).is_none());
    }

    #[test]
    fn test_mutation_and_serialization() {
        let mut doc = sample();
        doc.element_mut("text", 1).unwrap().append_text("Hello & bye");
        doc.element_mut("image", 0)
            .unwrap()
            .set_attribute("src", "http://x/a.png");

        let xml = doc.to_string();
        assert!(xml.contains(r#"<text id="2">Hello &amp; bye</text>"#));
        assert!(xml.contains(r#"<image id="1" src="http://x/a.png"/>"#));
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut element = Element::new("visual")
            .with_attribute("branding", "logo")
            .with_attribute("lang", "en");
        element.set_attribute("branding", "none");

        let attrs: Vec<_> = element.attributes().collect();
        assert_eq!(attrs, vec![("branding", "none"), ("lang", "en")]);
        assert_eq!(element.remove_attribute("lang"), Some("en".to_string()));
        assert_eq!(element.attribute("lang"), None);
    }

    #[test]
    fn test_reparse_serialized_document() {
        let mut doc = sample();
        doc.element_mut("text", 0).unwrap().append_text("caf\u{e9} <1>");

        let reparsed = XmlDocument::parse(&doc.to_string()).unwrap();
        assert_eq!(reparsed, doc);
        assert_eq!(reparsed.element("text", 0).unwrap().text(), "caf\u{e9} <1>");
    }

    #[test]
    fn test_take_child_element() {
        let mut root = Element::new("toast")
            .with_child(Element::new("visual"))
            .with_child(Element::new("audio").with_attribute("silent", "true"));

        let audio = root.take_child_element("audio").unwrap();
        assert_eq!(audio.attribute("silent"), Some("true"));
        assert_eq!(root.child_elements().count(), 1);
        assert!(root.take_child_element("audio").is_none());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(XmlDocument::parse(""), Err(XmlError::Empty));
        assert_eq!(XmlDocument::parse("<a/><b/>"), Err(XmlError::MultipleRoots));
        assert!(matches!(
            XmlDocument::parse("<a><b></a>"),
            Err(XmlError::Malformed(_))
        ));
        assert!(matches!(
            XmlDocument::parse("<a><b>"),
            Err(XmlError::Unclosed(_)) | Err(XmlError::Malformed(_))
        ));
    }
}
