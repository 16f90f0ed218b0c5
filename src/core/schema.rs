//! Declarative shape and constraint checks over untyped payloads.
//!
//! [`SchemaCheck`] walks a [`serde_json::Value`] the way a provider schema
//! describes it and records *every* violation, so callers get the whole
//! picture in one pass. Readers return `None` for anything invalid; the
//! typed value is only produced by [`SchemaCheck::finish`] when no issue
//! was recorded.
//!
//! ```
//! use mvno_normalize::core::{Rule, SchemaCheck};
//! use serde_json::json;
//!
//! let payload = json!({ "country": "SWE" });
//! let mut check = SchemaCheck::new();
//! let root = check.root(&payload);
//! let country = check.string(root.as_ref(), "country", &[Rule::ExactLength(2)]);
//! let issues = check.finish(country).unwrap_err();
//! assert_eq!(issues[0].to_string(), "country: String must contain exactly 2 character(s)");
//! ```

use serde_json::{Map, Value};

use super::dates::is_date;
use super::error::ValidationIssue;

/// Constraint applied by a field reader after its type check passed.
/// Rules that do not apply to the field's type are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule<'a> {
    /// String length must equal the given number of characters.
    ExactLength(usize),
    /// Number must be `>= 0`.
    NonNegative,
    /// String must be a parsable date; the message is reported otherwise.
    Date(&'a str),
}

/// An object found at `path` inside the payload.
#[derive(Debug, Clone)]
pub struct Obj<'v> {
    path: String,
    map: &'v Map<String, Value>,
}

/// Collects validation issues while reading an untyped payload.
#[derive(Debug, Default)]
pub struct SchemaCheck {
    issues: Vec<ValidationIssue>,
    namespaced: bool,
}

impl SchemaCheck {
    pub fn new() -> Self {
        Self::default()
    }

    /// A checker that matches object keys by local name, so `sms:ChargeSMS`
    /// satisfies a lookup for `ChargeSMS`.
    pub fn namespaced() -> Self {
        Self {
            namespaced: true,
            ..Self::default()
        }
    }

    /// Record an issue at `path`.
    pub fn issue(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(path, message));
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Require the payload root to be an object.
    pub fn root<'v>(&mut self, value: &'v Value) -> Option<Obj<'v>> {
        self.as_object(String::new(), value)
    }

    /// Require `value` (found at `path`) to be an object.
    pub fn as_object<'v>(&mut self, path: String, value: &'v Value) -> Option<Obj<'v>> {
        match value {
            Value::Object(map) => Some(Obj { path, map }),
            other => {
                self.type_mismatch(path, "object", other);
                None
            }
        }
    }

    /// Look up a required child. Returns the child's path and value.
    ///
    /// A missing parent yields `None` without a new issue: the parent's own
    /// failure has already been recorded.
    pub fn value<'v>(&mut self, parent: Option<&Obj<'v>>, key: &str) -> Option<(String, &'v Value)> {
        let parent = parent?;
        match self.lookup(parent.map, key) {
            Some((actual, value)) => Some((join(&parent.path, actual), value)),
            None => {
                self.issue(join(&parent.path, key), "Required");
                None
            }
        }
    }

    /// Read a required object child.
    pub fn object<'v>(&mut self, parent: Option<&Obj<'v>>, key: &str) -> Option<Obj<'v>> {
        let (path, value) = self.value(parent, key)?;
        self.as_object(path, value)
    }

    /// Read a required string child.
    pub fn string(&mut self, parent: Option<&Obj<'_>>, key: &str, rules: &[Rule<'_>]) -> Option<String> {
        let (path, value) = self.value(parent, key)?;
        let Value::String(s) = value else {
            self.type_mismatch(path, "string", value);
            return None;
        };
        self.check_string(&path, s, rules).then(|| s.clone())
    }

    /// Read a required number child.
    pub fn number(&mut self, parent: Option<&Obj<'_>>, key: &str, rules: &[Rule<'_>]) -> Option<f64> {
        let (path, value) = self.value(parent, key)?;
        let Some(n) = value.as_f64() else {
            self.type_mismatch(path, "number", value);
            return None;
        };
        self.check_number(&path, n, rules).then_some(n)
    }

    /// Read a required child that may be a string or a number, as text.
    pub fn text(&mut self, parent: Option<&Obj<'_>>, key: &str, rules: &[Rule<'_>]) -> Option<String> {
        let (path, value) = self.value(parent, key)?;
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => {
                self.type_mismatch(path, "string or number", other);
                return None;
            }
        };
        self.check_string(&path, &text, rules).then_some(text)
    }

    /// Read a required child that may be a number or numeric text, as a
    /// finite `f64`. `invalid` is reported when the text is not a number.
    pub fn numeric(
        &mut self,
        parent: Option<&Obj<'_>>,
        key: &str,
        invalid: &str,
        rules: &[Rule<'_>],
    ) -> Option<f64> {
        let (path, value) = self.value(parent, key)?;
        let n = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => coerce_number(s),
            other => {
                self.type_mismatch(path, "string or number", other);
                return None;
            }
        };
        let Some(n) = n else {
            self.issue(path, invalid);
            return None;
        };
        self.check_number(&path, n, rules).then_some(n)
    }

    /// Consume the checker. Yields the typed value only when no issue was
    /// recorded.
    pub fn finish<T>(mut self, parsed: Option<T>) -> Result<T, Vec<ValidationIssue>> {
        match parsed {
            Some(value) if self.issues.is_empty() => Ok(value),
            _ => {
                if self.issues.is_empty() {
                    self.issue("", "Payload does not match the expected shape");
                }
                Err(self.issues)
            }
        }
    }

    fn lookup<'v>(&self, map: &'v Map<String, Value>, key: &str) -> Option<(&'v str, &'v Value)> {
        if let Some((k, v)) = map.get_key_value(key) {
            return Some((k.as_str(), v));
        }
        if !self.namespaced {
            return None;
        }
        map.iter()
            .find(|(k, _)| local_name(k) == key)
            .map(|(k, v)| (k.as_str(), v))
    }

    fn check_string(&mut self, path: &str, s: &str, rules: &[Rule<'_>]) -> bool {
        let before = self.issues.len();
        for rule in rules {
            match *rule {
                Rule::ExactLength(len) if s.chars().count() != len => {
                    self.issue(path, format!("String must contain exactly {len} character(s)"));
                }
                Rule::Date(message) if !is_date(s) => self.issue(path, message),
                _ => {}
            }
        }
        self.issues.len() == before
    }

    fn check_number(&mut self, path: &str, n: f64, rules: &[Rule<'_>]) -> bool {
        let before = self.issues.len();
        for rule in rules {
            match *rule {
                Rule::NonNegative if n < 0.0 => {
                    self.issue(path, "Number must be greater than or equal to 0");
                }
                _ => {}
            }
        }
        self.issues.len() == before
    }

    fn type_mismatch(&mut self, path: String, expected: &str, found: &Value) {
        self.issue(path, format!("Expected {expected}, received {}", type_name(found)));
    }
}

/// Parse numeric text into a finite float. Blank text, `NaN` and infinities
/// are not numbers.
pub fn coerce_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Join a parent path and a child segment with `.`.
pub fn join(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}.{child}")
    }
}

/// The part of a qualified XML name after its namespace prefix.
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
