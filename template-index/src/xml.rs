//! Small element tree over `quick-xml` for the manifest and index formats.
//!
//! Both documents are a handful of elements deep and a few kilobytes at
//! most, so they are read into a tree and queried by child name.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

/// Errors from reading an XML document.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The document is not well-formed.
    #[error("Malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// An attribute or text node could not be decoded.
    #[error("Malformed XML content: {0}")]
    Content(String),

    /// The document has no root element.
    #[error("Document has no root element")]
    Empty,

    /// The document ended inside an element.
    #[error("Element '{0}' is not closed")]
    Unclosed(String),

    /// A second top-level element follows the root.
    #[error("Element '{0}' follows the root element")]
    TrailingElement(String),

    /// Writing the document failed.
    #[error("Failed to write XML: {0}")]
    Write(String),
}

/// An element with its attributes, text content and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct XmlElement {
    pub(crate) name: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) text: String,
    pub(crate) children: Vec<XmlElement>,
}

impl XmlElement {
    /// Returns the value of an attribute, if present.
    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first child element with the given name.
    pub(crate) fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Returns the text of the first child with the given name.
    pub(crate) fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text.as_str())
    }

    /// Iterates the child elements with the given name.
    pub(crate) fn children_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Parses the integer `format` attribute.
    ///
    /// Returns `Err` with the raw value (empty if missing) when the attribute
    /// is absent or not an integer.
    pub(crate) fn format_version(&self) -> Result<u32, String> {
        let raw = self.attribute("format").unwrap_or_default();
        raw.trim().parse().map_err(|_| raw.to_string())
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| XmlError::Content(e.to_string()))?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|e| XmlError::Content(e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }
}

/// Parses a document and returns its root element.
///
/// Element text is the concatenation of its text and CDATA nodes, trimmed
/// once when the element closes.
pub(crate) fn parse_document(bytes: &[u8]) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_reader(bytes);

    let mut buf = Vec::new();
    let mut open: Vec<XmlElement> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => open.push(XmlElement::from_start(&start)?),
            Event::Empty(start) => {
                let element = XmlElement::from_start(&start)?;
                close(&mut open, &mut root, element)?;
            }
            Event::End(_) => {
                if let Some(element) = open.pop() {
                    close(&mut open, &mut root, element)?;
                }
            }
            Event::Text(text) => {
                if let Some(current) = open.last_mut() {
                    let text = text
                        .unescape()
                        .map_err(|e| XmlError::Content(e.to_string()))?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(current) = open.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(unclosed) = open.pop() {
        return Err(XmlError::Unclosed(unclosed.name));
    }

    root.ok_or(XmlError::Empty)
}

/// Attaches a finished element to its parent, or makes it the root.
fn close(
    open: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    mut element: XmlElement,
) -> Result<(), XmlError> {
    element.text = element.text.trim().to_string();

    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(XmlError::TrailingElement(element.name)),
        None => *root = Some(element),
    }
    Ok(())
}

/// Indented document writer.
pub(crate) struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Starts a document with an XML declaration.
    pub(crate) fn new() -> Result<Self, XmlError> {
        let mut inner = Writer::new_with_indent(Vec::new(), b' ', 2);
        inner
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(write_error)?;
        Ok(Self { inner })
    }

    /// Opens an element.
    pub(crate) fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), XmlError> {
        let mut start = BytesStart::new(name);
        for &attribute in attributes {
            start.push_attribute(attribute);
        }
        self.inner
            .write_event(Event::Start(start))
            .map_err(write_error)
    }

    /// Closes an element.
    pub(crate) fn end(&mut self, name: &str) -> Result<(), XmlError> {
        self.inner
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(write_error)
    }

    /// Writes `<name>text</name>`, or `<name />` when there is no text.
    pub(crate) fn text_element(&mut self, name: &str, text: Option<&str>) -> Result<(), XmlError> {
        match text.filter(|text| !text.is_empty()) {
            Some(text) => {
                self.start(name, &[])?;
                self.inner
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(write_error)?;
                self.end(name)
            }
            None => self
                .inner
                .write_event(Event::Empty(BytesStart::new(name)))
                .map_err(write_error),
        }
    }

    /// Returns the finished document.
    pub(crate) fn finish(self) -> Vec<u8> {
        let mut document = self.inner.into_inner();
        document.push(b'\n');
        document
    }
}

fn write_error(err: impl std::fmt::Display) -> XmlError {
    XmlError::Write(err.to_string())
}
