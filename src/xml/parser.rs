use std::str::Utf8Error;

use quick_xml::Reader;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};
use thiserror::Error;

use super::{ATTRIBUTE_PREFIX, TEXT_KEY, XmlParserOptions};
use crate::core::InvalidPayloadError;

/// Why well-formed-looking input could not be turned into a tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XmlError {
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("invalid attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),

    #[error("element <{0}> is never closed")]
    Unclosed(String),

    #[error("closing tag </{0}> does not match an open element")]
    Unmatched(String),

    #[error("text found outside of the root element")]
    TextOutsideRoot,

    #[error("document has no root element")]
    NoRoot,

    #[error("elements nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Deepest element nesting accepted before parsing stops.
pub const MAX_DEPTH: usize = 128;

static SHARED: XmlParser = XmlParser::new(XmlParserOptions::DEFAULT);

/// Parse XML text with the shared default parser.
pub fn parse_xml(xml: &str) -> Result<Value, InvalidPayloadError> {
    SHARED.parse(xml)
}

/// XML-to-tree parser. Holds only its options, so a single instance can be
/// used from any number of threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XmlParser {
    options: XmlParserOptions,
}

impl XmlParser {
    pub const fn new(options: XmlParserOptions) -> Self {
        Self { options }
    }

    /// The process-wide parser with [`XmlParserOptions::DEFAULT`].
    pub fn shared() -> &'static XmlParser {
        &SHARED
    }

    pub fn options(&self) -> XmlParserOptions {
        self.options
    }

    /// Parse XML text into an untyped tree.
    ///
    /// Input whose trimmed form does not start with `<` and end with `>` is
    /// rejected before the reader runs. Reader failures are wrapped with the
    /// [`XmlError`] as cause.
    pub fn parse(&self, xml: &str) -> Result<Value, InvalidPayloadError> {
        let trimmed = xml.trim();
        if !trimmed.starts_with('<') || !trimmed.ends_with('>') {
            tracing::warn!(len = xml.len(), "rejected XML payload: not enclosed in angle brackets");
            return Err(InvalidPayloadError::invalid_format("XML"));
        }

        self.build_tree(trimmed).map_err(|e| {
            tracing::warn!(error = %e, "failed to parse XML payload");
            InvalidPayloadError::parse_failure("XML", e)
        })
    }

    fn build_tree(&self, xml: &str) -> Result<Value, XmlError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(self.options.trim_text);

        let mut document = Map::new();
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    check_depth(&stack)?;
                    stack.push(self.open(e)?);
                }
                Event::Empty(ref e) => {
                    check_depth(&stack)?;
                    let frame = self.open(e)?;
                    attach(&mut stack, &mut document, frame);
                }
                Event::End(ref e) => {
                    let qname = e.name();
                    let name = std::str::from_utf8(qname.as_ref())?;
                    match stack.pop() {
                        Some(frame) if frame.name == name => {
                            attach(&mut stack, &mut document, frame);
                        }
                        _ => return Err(XmlError::Unmatched(name.to_string())),
                    }
                }
                Event::Text(ref e) => {
                    let text = e.unescape()?;
                    self.push_text(&mut stack, &text)?;
                }
                Event::CData(e) => {
                    let raw = e.into_inner();
                    self.push_text(&mut stack, std::str::from_utf8(&raw)?)?;
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctypes.
                _ => {}
            }
        }

        if let Some(frame) = stack.pop() {
            return Err(XmlError::Unclosed(frame.name));
        }
        if document.is_empty() {
            return Err(XmlError::NoRoot);
        }
        Ok(Value::Object(document))
    }

    fn open(&self, start: &BytesStart<'_>) -> Result<Frame, XmlError> {
        let name = std::str::from_utf8(start.name().as_ref())?.to_string();
        let mut children = Map::new();

        if !self.options.ignore_attributes {
            for attr in start.attributes() {
                let attr = attr?;
                let key = std::str::from_utf8(attr.key.as_ref())?;
                let value = attr.unescape_value()?;
                children.insert(
                    format!("{ATTRIBUTE_PREFIX}{key}"),
                    Value::String(value.into_owned()),
                );
            }
        }

        Ok(Frame {
            name,
            children,
            text: String::new(),
        })
    }

    fn push_text(&self, stack: &mut [Frame], text: &str) -> Result<(), XmlError> {
        // Whitespace between elements is layout, not content.
        if text.trim().is_empty() {
            return Ok(());
        }
        let text = if self.options.trim_text { text.trim() } else { text };
        match stack.last_mut() {
            Some(frame) => {
                frame.text.push_str(text);
                Ok(())
            }
            None => Err(XmlError::TextOutsideRoot),
        }
    }
}

/// An element being read: its qualified name, attributes and child
/// elements collected so far, and its own text.
struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn into_entry(self) -> (String, Value) {
        let value = if self.children.is_empty() {
            Value::String(self.text)
        } else {
            let mut map = self.children;
            if !self.text.is_empty() {
                map.insert(TEXT_KEY.to_string(), Value::String(self.text));
            }
            Value::Object(map)
        };
        (self.name, value)
    }
}

fn check_depth(stack: &[Frame]) -> Result<(), XmlError> {
    if stack.len() >= MAX_DEPTH {
        return Err(XmlError::TooDeep(MAX_DEPTH));
    }
    Ok(())
}

/// Attach a closed element to its parent, or to the document if it was a root.
fn attach(stack: &mut [Frame], document: &mut Map<String, Value>, frame: Frame) {
    let (name, value) = frame.into_entry();
    let parent = match stack.last_mut() {
        Some(open) => &mut open.children,
        None => document,
    };
    insert_child(parent, name, value);
}

/// Insert a child, turning repeated names into an array in document order.
fn insert_child(map: &mut Map<String, Value>, name: String, value: Value) {
    match map.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(name, value);
        }
    }
}
