//! A minimal XML element tree.
//!
//! QML documents are mutated structurally (layers spliced in and out of
//! symbols), so they are held as a plain element tree rather than being
//! streamed. Attribute order is preserved; declarations, doctypes, and
//! comments are dropped on parse and regenerated on save where needed.

use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Result, VectileError};

/// One node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element: name, ordered attributes, ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute, builder style.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Value of an attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Append a child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Direct child elements, in order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First direct child element with the given name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|element| element.name == name)
    }

    /// First descendant element with the given name, depth first.
    pub fn find_descendant(&self, name: &str) -> Option<&Element> {
        for element in self.child_elements() {
            if element.name == name {
                return Some(element);
            }
            if let Some(found) = element.find_descendant(name) {
                return Some(found);
            }
        }
        None
    }

    /// Mutable variant of [`Element::find_descendant`].
    pub fn find_descendant_mut(&mut self, name: &str) -> Option<&mut Element> {
        for node in &mut self.children {
            if let Node::Element(element) = node {
                if element.name == name {
                    return Some(element);
                }
                if let Some(found) = element.find_descendant_mut(name) {
                    return Some(found);
                }
            }
        }
        None
    }
}

/// Parse an XML document into its root element.
pub fn parse(source: &str) -> Result<Element> {
    let mut reader = Reader::from_str(source);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    // A text run may arrive as several events: the reader splits character
    // data around entity references (`&amp;` -> a `GeneralRef` event) into
    // separate pieces. Accumulate them and flush as a single trimmed text
    // node on the next structural boundary.
    let mut text: String = String::new();

    loop {
        let event = reader.read_event().map_err(|e| VectileError::Document {
            message: format!("XML parse error at byte {}: {}", reader.buffer_position(), e),
            help: None,
        })?;

        match event {
            Event::Start(start) => {
                flush_text(&mut text, &mut stack);
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                flush_text(&mut text, &mut stack);
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                flush_text(&mut text, &mut stack);
                let element = stack.pop().ok_or_else(|| VectileError::Document {
                    message: "XML parse error: unbalanced closing tag".to_string(),
                    help: None,
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(chunk) => {
                let content = chunk.xml_content().map_err(|e| VectileError::Document {
                    message: format!("XML text decode error: {}", e),
                    help: None,
                })?;
                text.push_str(&content);
            }
            Event::GeneralRef(reference) => {
                if let Some(ch) = reference.resolve_char_ref().map_err(|e| {
                    VectileError::Document {
                        message: format!("XML text decode error: {}", e),
                        help: None,
                    }
                })? {
                    text.push(ch);
                } else {
                    let name = reference.decode().map_err(|e| VectileError::Document {
                        message: format!("XML text decode error: {}", e),
                        help: None,
                    })?;
                    let resolved = quick_xml::escape::resolve_predefined_entity(&name)
                        .ok_or_else(|| VectileError::Document {
                            message: format!("unknown XML entity: &{};", name),
                            help: None,
                        })?;
                    text.push_str(resolved);
                }
            }
            Event::CData(data) => {
                flush_text(&mut text, &mut stack);
                let content = String::from_utf8_lossy(&data).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(content));
                }
            }
            Event::Eof => {
                flush_text(&mut text, &mut stack);
                break;
            }
            // Declarations, doctypes, comments, and processing
            // instructions are not part of the tree.
            _ => {}
        }
    }

    root.ok_or_else(|| VectileError::Document {
        message: "XML document has no root element".to_string(),
        help: None,
    })
}

/// Flush an accumulated text run as a single trimmed text node, matching the
/// whitespace trimming the reader previously applied to whole text events.
fn flush_text(text: &mut String, stack: &mut [Element]) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(Node::Text(trimmed.to_string()));
        }
    }
    text.clear();
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Element(element));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(VectileError::Document {
            message: "XML document has multiple root elements".to_string(),
            help: None,
        }),
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| VectileError::Document {
            message: format!("XML attribute error: {}", e),
            help: None,
        })?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| VectileError::Document {
                message: format!("XML attribute decode error: {}", e),
                help: None,
            })?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

/// Serialize an element tree with two-space indentation.
pub fn serialize(root: &Element) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    write_element(&mut writer, root)?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| VectileError::Document {
        message: format!("serialized XML is not UTF-8: {}", e),
        help: None,
    })
}

fn write_element(writer: &mut Writer<Cursor<Vec<u8>>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        write_event(writer, Event::Empty(start))
    } else {
        write_event(writer, Event::Start(start))?;
        for child in &element.children {
            match child {
                Node::Element(child) => write_element(writer, child)?,
                Node::Text(text) => {
                    write_event(writer, Event::Text(BytesText::new(text)))?;
                }
            }
        }
        write_event(writer, Event::End(BytesEnd::new(element.name.as_str())))
    }
}

fn write_event(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(|e| VectileError::Document {
        message: format!("XML write error: {}", e),
        help: None,
    })
}
