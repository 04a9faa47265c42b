//! Structured interpretation of template content.
//!
//! `self:` references index into the template as data, so the resolver
//! needs a structured reading of whatever text is currently on hand. YAML
//! documents are deserialized straight into [`serde_json::Value`] so one
//! extraction routine serves both formats.

use serde::Deserialize;
use serde_json::Value;

/// The template interpreted as structured data.
///
/// Parsing tries JSON, then single-document YAML, then a multi-document
/// YAML stream, then falls back to plain text; the first success wins. Only
/// object or array roots count as structured, so scalar roots fall through
/// to the next parser and ultimately to [`DocumentView::Text`].
///
/// # Example
///
/// ```
/// use preconfig::DocumentView;
///
/// let view = DocumentView::parse(r#"{"name": "demo"}"#);
/// assert_eq!(view.extract("name"), Some("demo".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentView {
    /// Free-form text; carries no addressable structure.
    Text(String),
    /// A JSON object or array.
    Json(Value),
    /// A single YAML document with an object or array root.
    Yaml(Value),
    /// A multi-document YAML stream; paths carry a leading document index.
    Multi(Vec<Value>),
}

impl DocumentView {
    /// Interpret `content`, falling through parser by parser.
    ///
    /// Never fails; unparseable content is plain text.
    pub fn parse(content: &str) -> Self {
        if let Ok(value) = serde_json::from_str::<Value>(content)
            && is_container(&value)
        {
            return DocumentView::Json(value);
        }

        if let Ok(value) = serde_yaml::from_str::<Value>(content)
            && is_container(&value)
        {
            return DocumentView::Yaml(value);
        }

        let documents: Result<Vec<Value>, _> = serde_yaml::Deserializer::from_str(content)
            .map(Value::deserialize)
            .collect();
        if let Ok(documents) = documents
            && !documents.is_empty()
            && documents.iter().all(is_container)
        {
            return DocumentView::Multi(documents);
        }

        DocumentView::Text(content.to_string())
    }

    /// Whether the content ended up as plain text.
    pub fn is_text(&self) -> bool {
        matches!(self, DocumentView::Text(_))
    }

    /// Look up a dotted path in this view.
    ///
    /// Multi-document streams take the zero-based document index as the
    /// first path segment (`0.name`, `1.name`, ...). Text views hold
    /// nothing to look up.
    pub fn extract(&self, path: &str) -> Option<String> {
        match self {
            DocumentView::Text(_) => None,
            DocumentView::Json(value) | DocumentView::Yaml(value) => extract_value(value, path),
            DocumentView::Multi(documents) => {
                let (index, rest) = match path.split_once('.') {
                    Some((index, rest)) => (index, Some(rest)),
                    None => (path, None),
                };
                let document = documents.get(index.parse::<usize>().ok()?)?;
                match rest {
                    Some(rest) => extract_value(document, rest),
                    None => serde_json::to_string(document).ok(),
                }
            }
        }
    }
}

fn is_container(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

/// Dotted-path lookup into a JSON value.
///
/// Each path segment is an object key or a numeric array index, so `a.b.2`
/// reads key `a`, key `b`, element `2`. Booleans and numbers come back in
/// string form, strings come back verbatim, objects and arrays come back
/// JSON-serialized. Missing values and explicit nulls yield `None`.
pub fn extract_value(value: &Value, path: &str) -> Option<String> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    match current {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Null => None,
        container => serde_json::to_string(container).ok(),
    }
}
