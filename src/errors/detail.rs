//! Formatting of MultiViz error bodies.
//!
//! The service reports failures as `{"detail": ...}` where `detail` is either
//! a list of validation records, a plain message, or something else entirely.
//! [`ErrorDetail`] captures those shapes and renders them for log lines.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fmt::{self, Write};

use crate::errors::MultivizResult;

/// Placeholder for validation fields the service left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// One validation record, reduced to the fields worth displaying.
///
/// The echoed `input` and any other extra fields are dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Error type identifier.
    #[serde(rename = "type")]
    pub error_type: Value,
    /// Location of the offending field.
    pub loc: Value,
    /// Human readable message.
    pub msg: Value,
    /// Documentation link.
    pub url: Value,
}

impl ValidationIssue {
    /// Extracts the displayable fields of a record.
    ///
    /// Records that are not objects yield `"N/A"` for every field.
    pub fn from_record(record: &Value) -> Self {
        let field = |name: &str| {
            record
                .get(name)
                .cloned()
                .unwrap_or_else(|| Value::String(NOT_AVAILABLE.to_string()))
        };

        Self {
            error_type: field("type"),
            loc: field("loc"),
            msg: field("msg"),
            url: field("url"),
        }
    }
}

/// Shape of the `detail` field of an error body.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    /// A list of validation records (a lone record counts as a list of one).
    ValidationList(Vec<ValidationIssue>),
    /// A plain message.
    PlainMessage(String),
    /// No usable `detail`; the whole decoded body.
    Opaque(Value),
}

#[derive(Serialize)]
struct DetailEnvelope<'a> {
    detail: &'a [ValidationIssue],
}

impl ErrorDetail {
    /// Decodes an error body and classifies its `detail`.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::from_value(value))
    }

    /// Classifies an already decoded error body.
    pub fn from_value(body: Value) -> Self {
        if let Some(detail) = body.get("detail") {
            match detail {
                Value::Array(records) => {
                    return ErrorDetail::ValidationList(
                        records.iter().map(ValidationIssue::from_record).collect(),
                    );
                }
                Value::Object(_) => {
                    return ErrorDetail::ValidationList(vec![ValidationIssue::from_record(
                        detail,
                    )]);
                }
                Value::String(message) => {
                    return ErrorDetail::PlainMessage(message.clone());
                }
                _ => {}
            }
        }

        ErrorDetail::Opaque(body)
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorDetail::ValidationList(issues) => {
                let mut buf = Vec::new();
                let formatter = PrettyFormatter::with_indent(b"    ");
                let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
                DetailEnvelope { detail: issues }
                    .serialize(&mut serializer)
                    .map_err(|_| fmt::Error)?;
                f.write_str(&escape_non_ascii(&String::from_utf8_lossy(&buf)))
            }
            ErrorDetail::PlainMessage(message) => f.write_str(message),
            ErrorDetail::Opaque(body) => write!(f, "{}", body),
        }
    }
}

/// Writes every non-ASCII character as `\uXXXX` escapes (UTF-16 units).
///
/// JSON output only carries non-ASCII text inside strings, so the result is
/// still valid JSON.
fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{:04x}", unit);
            }
        }
    }
    out
}

/// Turns a raw JSON error body into a human readable string.
///
/// Fails with [`MultivizError::Serialization`](crate::errors::MultivizError)
/// when the body is not valid JSON.
pub fn format_error_body(body: &str) -> MultivizResult<String> {
    Ok(ErrorDetail::parse(body)?.to_string())
}
