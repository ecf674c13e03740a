//! Lossless XML element tree
//!
//! NAF documents carry many layers this crate never looks at. The merger has
//! to write all of them back untouched, so documents are read into a small
//! element tree that keeps elements, attribute order, text, comments and
//! CDATA, and is written back out with two-space indentation. Whitespace-only
//! text between elements is the one thing dropped on read.

use std::io::Write;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

/// Error reading or writing XML
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("XML error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("XML error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("XML error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: unexpected closing tag </{0}>")]
    UnexpectedClose(String),

    #[error("XML error: unclosed element <{0}>")]
    Unclosed(String),

    #[error("XML error: no root element")]
    NoRoot,
}

/// A child of an element
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder-style child appender
    pub fn with_child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(XmlNode::Element(child));
    }

    /// Child elements with the given name
    pub fn elements<'e, 'n>(&'e self, name: &'n str) -> impl Iterator<Item = &'e Element> {
        self.children.iter().filter_map(move |node| match node {
            XmlNode::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    pub fn elements_mut<'e, 'n>(
        &'e mut self,
        name: &'n str,
    ) -> impl Iterator<Item = &'e mut Element> {
        self.children.iter_mut().filter_map(move |node| match node {
            XmlNode::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// First child element with the given name
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.children.iter().find_map(|node| match node {
            XmlNode::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    pub fn element_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            XmlNode::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// First child element with the given name, appended when missing
    pub fn element_or_insert(&mut self, name: &str) -> &mut Element {
        let position = self
            .children
            .iter()
            .position(|node| matches!(node, XmlNode::Element(e) if e.name == name));
        let position = match position {
            Some(position) => position,
            None => {
                self.push(Element::new(name));
                self.children.len() - 1
            }
        };
        match &mut self.children[position] {
            XmlNode::Element(e) => e,
            _ => unreachable!("position points at an element"),
        }
    }

    /// Concatenated text content of direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(t) | XmlNode::CData(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// A parsed XML document
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub root: Element,
}

impl XmlDocument {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Parse a document from text
    pub fn parse(text: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(text);

        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    stack.push(element_from(&start)?);
                }
                Event::Empty(start) => {
                    let element = element_from(&start)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::End(end) => {
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    let Some(element) = stack.pop() else {
                        return Err(XmlError::UnexpectedClose(name));
                    };
                    attach(&mut stack, &mut root, element);
                }
                Event::Text(text) => {
                    let content = text.unescape()?;
                    // indentation between elements is regenerated on write
                    if content.trim().is_empty() {
                        continue;
                    }
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::Text(content.into_owned()));
                    }
                }
                Event::CData(data) => {
                    if let Some(parent) = stack.last_mut() {
                        let content = String::from_utf8_lossy(&data.into_inner()).into_owned();
                        parent.children.push(XmlNode::CData(content));
                    }
                }
                Event::Comment(comment) => {
                    if let Some(parent) = stack.last_mut() {
                        let content = String::from_utf8_lossy(&comment.into_inner()).into_owned();
                        parent.children.push(XmlNode::Comment(content));
                    }
                }
                Event::Eof => break,
                // declaration, processing instructions and doctype are regenerated
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(XmlError::Unclosed(open.name));
        }
        root.map(Self::new).ok_or(XmlError::NoRoot)
    }

    /// Serialize with an XML declaration and two-space indentation
    pub fn write_to<W: Write>(&self, out: W) -> Result<(), XmlError> {
        let mut writer = Writer::new_with_indent(out, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_element(&mut writer, &self.root)?;
        let out = writer.get_mut();
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }

    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

fn element_from(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let mut element = Element::new(&String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None => *root = Some(element),
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), XmlError> {
    let start = BytesStart::new(element.name.as_str()).with_attributes(
        element
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str())),
    );

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(e) => write_element(writer, e)?,
            XmlNode::Text(t) => writer.write_event(Event::Text(BytesText::new(t)))?,
            XmlNode::CData(t) => writer.write_event(Event::CData(BytesCData::new(t.as_str())))?,
            XmlNode::Comment(t) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(t.as_str())))?
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
