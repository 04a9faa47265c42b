//! Post-resolution output formatting.
//!
//! Resolved output is a plain string; callers can hand it back as-is or ask
//! for a structured rendering. Structured targets re-read the string
//! through [`DocumentView`], so YAML input can come out as pretty JSON and
//! vice versa.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::document::DocumentView;

/// Target rendering for resolved output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The resolved string, untouched.
    Text,
    /// Pretty-printed JSON.
    Json,
    /// YAML; multi-document streams stay multi-document.
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// An error that occurred while reformatting resolved output.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A structured target asked of content that parsed as plain text.
    #[error("cannot format plain text content as {target}")]
    TextContent { target: OutputFormat },

    /// Serialization to the target failed.
    #[error("{target} serialization failed: {message}")]
    Serialization {
        target: OutputFormat,
        message: String,
    },
}

/// Re-render resolved output in the requested format.
///
/// # Errors
///
/// Fails when a structured target is requested for content that does not
/// parse as JSON or YAML.
///
/// # Example
///
/// ```
/// use preconfig::format::{OutputFormat, reformat};
///
/// let json = reformat("name: demo", OutputFormat::Json).unwrap();
/// assert_eq!(json, "{\n  \"name\": \"demo\"\n}");
/// ```
pub fn reformat(content: &str, target: OutputFormat) -> Result<String, FormatError> {
    match target {
        OutputFormat::Text => Ok(content.to_string()),
        OutputFormat::Json => match DocumentView::parse(content) {
            DocumentView::Text(_) => Err(FormatError::TextContent { target }),
            DocumentView::Json(value) | DocumentView::Yaml(value) => to_json(&value, target),
            DocumentView::Multi(documents) => to_json(&Value::Array(documents), target),
        },
        OutputFormat::Yaml => match DocumentView::parse(content) {
            DocumentView::Text(_) => Err(FormatError::TextContent { target }),
            DocumentView::Json(value) | DocumentView::Yaml(value) => to_yaml(&value, target),
            DocumentView::Multi(documents) => {
                let rendered = documents
                    .iter()
                    .map(|document| to_yaml(document, target))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rendered.join("---\n"))
            }
        },
    }
}

fn to_json(value: &Value, target: OutputFormat) -> Result<String, FormatError> {
    serde_json::to_string_pretty(value).map_err(|error| FormatError::Serialization {
        target,
        message: error.to_string(),
    })
}

fn to_yaml(value: &Value, target: OutputFormat) -> Result<String, FormatError> {
    serde_yaml::to_string(value).map_err(|error| FormatError::Serialization {
        target,
        message: error.to_string(),
    })
}
