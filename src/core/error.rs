use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Boxed underlying cause carried by integration errors.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Short machine-readable code identifying which stage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Input failed parsing or schema validation.
    #[serde(rename = "INVALID_PAYLOAD")]
    InvalidPayload,
    /// The data usage conversion stage failed.
    #[serde(rename = "DATA_USAGE_ERROR")]
    DataUsage,
    /// The SMS charge conversion stage failed.
    #[serde(rename = "SMS_CHARGE_ERROR")]
    SmsCharge,
    /// The assembled record failed the internal-format schema.
    #[serde(rename = "INTERNAL_FORMAT_ERROR")]
    InternalFormat,
    /// Any other integration failure.
    #[serde(rename = "INTEGRATION_ERROR")]
    Integration,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPayload => "INVALID_PAYLOAD",
            Self::DataUsage => "DATA_USAGE_ERROR",
            Self::SmsCharge => "SMS_CHARGE_ERROR",
            Self::InternalFormat => "INTERNAL_FORMAT_ERROR",
            Self::Integration => "INTEGRATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single schema violation with the dotted path of the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dot-separated path into the payload (e.g. "usage.data.country").
    /// Empty for the payload root.
    pub path: String,
    /// Human-readable error description.
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Aggregate of schema violations, usable as an error cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_issues(.0))]
pub struct ValidationReport(pub Vec<ValidationIssue>);

/// Join issues into a single `; `-separated line.
pub fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// General error returned by the integration layer.
///
/// Carries a message, a stage code, an optional wrapped cause and a
/// free-form context map. The cause is exposed through
/// [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct IntegrationError {
    message: String,
    code: ErrorCode,
    #[source]
    cause: Option<BoxedCause>,
    context: BTreeMap<String, Value>,
}

impl IntegrationError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            cause: None,
            context: BTreeMap::new(),
        }
    }

    /// Attach the underlying error.
    pub fn with_cause(mut self, cause: impl Into<BoxedCause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Attach a context entry, replacing any previous value under `key`.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn context(&self) -> &BTreeMap<String, Value> {
        &self.context
    }

    /// The wrapped cause, if any.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// The wrapped cause downcast to an [`InvalidPayloadError`], if it is one.
    pub fn invalid_payload(&self) -> Option<&InvalidPayloadError> {
        self.cause()?.downcast_ref::<InvalidPayloadError>()
    }
}

/// Input failed parsing or schema validation. Always coded
/// [`ErrorCode::InvalidPayload`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct InvalidPayloadError {
    message: String,
    issues: Vec<ValidationIssue>,
    #[source]
    cause: Option<BoxedCause>,
    context: BTreeMap<String, Value>,
}

impl InvalidPayloadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            issues: Vec::new(),
            cause: None,
            context: BTreeMap::new(),
        }
    }

    /// Input rejected by the cheap shape check before any parsing.
    pub fn invalid_format(what: &str) -> Self {
        Self::new(format!("Invalid {what} format"))
    }

    /// The underlying parser failed.
    pub fn parse_failure(what: &str, cause: impl Into<BoxedCause>) -> Self {
        Self::new(format!("Failed to parse {what} payload")).with_cause(cause)
    }

    /// Schema validation failed; the message lists every issue after `prefix`.
    /// The issues are also carried in the context under `errors`.
    pub fn schema(prefix: &str, issues: Vec<ValidationIssue>) -> Self {
        let errors = serde_json::to_value(&issues).unwrap_or_default();
        let mut err = Self::new(format!("{prefix}: {}", join_issues(&issues)))
            .with_context("errors", errors);
        err.issues = issues;
        err
    }

    pub fn with_cause(mut self, cause: impl Into<BoxedCause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::InvalidPayload
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field-level schema violations, empty for format and parse failures.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn context(&self) -> &BTreeMap<String, Value> {
        &self.context
    }
}

impl From<InvalidPayloadError> for IntegrationError {
    fn from(err: InvalidPayloadError) -> Self {
        let InvalidPayloadError {
            message,
            cause,
            context,
            ..
        } = err;
        Self {
            message,
            code: ErrorCode::InvalidPayload,
            cause,
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn codes_display_as_wire_strings() {
        assert_eq!(ErrorCode::InvalidPayload.to_string(), "INVALID_PAYLOAD");
        assert_eq!(ErrorCode::DataUsage.to_string(), "DATA_USAGE_ERROR");
        assert_eq!(
            serde_json::to_value(ErrorCode::InternalFormat).unwrap(),
            Value::from("INTERNAL_FORMAT_ERROR")
        );
    }

    #[test]
    fn issue_display_names_root() {
        assert_eq!(
            ValidationIssue::new("", "Expected object, received string").to_string(),
            "(root): Expected object, received string"
        );
        assert_eq!(
            ValidationIssue::new("msisdn", "Required").to_string(),
            "msisdn: Required"
        );
    }

    #[test]
    fn schema_error_lists_every_issue() {
        let err = InvalidPayloadError::schema(
            "Invalid data usage payload",
            vec![
                ValidationIssue::new("msisdn", "Required"),
                ValidationIssue::new("usage.data.country", "String must contain exactly 2 character(s)"),
            ],
        );
        assert_eq!(
            err.to_string(),
            "Invalid data usage payload: msisdn: Required; usage.data.country: String must contain exactly 2 character(s)"
        );
        assert_eq!(err.issues().len(), 2);
        assert_eq!(err.code(), ErrorCode::InvalidPayload);
        assert_eq!(
            err.context()["errors"],
            serde_json::json!([
                { "path": "msisdn", "message": "Required" },
                { "path": "usage.data.country", "message": "String must contain exactly 2 character(s)" }
            ])
        );
    }

    #[test]
    fn integration_error_exposes_cause_as_source() {
        let inner = InvalidPayloadError::invalid_format("XML");
        let err = IntegrationError::new(ErrorCode::SmsCharge, "Failed to process SMS charges")
            .with_cause(inner)
            .with_context("user_id", "abc123");

        assert_eq!(err.code(), ErrorCode::SmsCharge);
        assert_eq!(err.source().unwrap().to_string(), "Invalid XML format");
        assert_eq!(err.invalid_payload().unwrap().message(), "Invalid XML format");
        assert_eq!(err.context()["user_id"], Value::from("abc123"));
    }

    #[test]
    fn invalid_payload_converts_into_integration_error() {
        let err: IntegrationError = InvalidPayloadError::schema(
            "Invalid SMS charge payload",
            vec![ValidationIssue::new("Envelope", "Required")],
        )
        .into();

        assert_eq!(err.code(), ErrorCode::InvalidPayload);
        assert!(err.message().starts_with("Invalid SMS charge payload"));
        assert_eq!(err.context()["errors"][0]["path"], Value::from("Envelope"));
    }
}
