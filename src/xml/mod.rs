//! XML parser adapter.
//!
//! Turns XML text into the same untyped tree ([`serde_json::Value`]) that
//! JSON payloads arrive as, so one schema toolkit validates both.
//!
//! # Tree shape
//!
//! - element with only text → string (`<a>x</a>` → `"x"`)
//! - empty element → `""`
//! - element with children → object keyed by qualified tag name
//! - repeated sibling tags → array in document order
//! - attributes → `"@_name"` keys, unless ignored
//! - text next to children or attributes → `"#text"`
//!
//! # Example
//!
//! ```
//! use mvno_normalize::xml;
//! use serde_json::json;
//!
//! let tree = xml::parse_xml("<root><item>value</item></root>").unwrap();
//! assert_eq!(tree, json!({ "root": { "item": "value" } }));
//! ```

mod parser;

pub use parser::{MAX_DEPTH, XmlError, XmlParser, parse_xml};

/// Prefix for attribute keys in the parsed tree.
pub const ATTRIBUTE_PREFIX: &str = "@_";

/// Key holding an element's own text when it also has children or attributes.
pub const TEXT_KEY: &str = "#text";

/// Parser configuration. Immutable once built; share freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlParserOptions {
    /// Drop attributes instead of storing them under `@_` keys.
    pub ignore_attributes: bool,
    /// Trim whitespace around text values.
    pub trim_text: bool,
}

impl XmlParserOptions {
    /// Attributes kept, text trimmed.
    pub const DEFAULT: Self = Self {
        ignore_attributes: false,
        trim_text: true,
    };
}

impl Default for XmlParserOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}
