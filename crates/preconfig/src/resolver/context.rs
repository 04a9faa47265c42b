//! Resolution context shared by every source within a pass.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::document::DocumentView;

/// State available to sources while a pass runs.
///
/// Everything here is read-only during a pass: the working directory for
/// `file` references, the caller's parameters (kept both as the original
/// map, handed to recursive file resolution, and as a JSON object for
/// dotted lookup), and the current reading of the document for `self`
/// references. Only the driver replaces the document view, and only
/// between passes.
pub struct Context<'a> {
    cwd: &'a Path,
    parameter: &'a HashMap<String, String>,
    parameter_view: Value,
    document: DocumentView,
}

impl<'a> Context<'a> {
    /// Create a context for one resolution run.
    pub fn new(
        cwd: &'a Path,
        parameter: &'a HashMap<String, String>,
        document: DocumentView,
    ) -> Self {
        let parameter_view = Value::Object(
            parameter
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect(),
        );
        Self {
            cwd,
            parameter,
            parameter_view,
            document,
        }
    }

    /// Directory that relative `file` references resolve against.
    pub fn cwd(&self) -> &Path {
        self.cwd
    }

    /// The caller's parameter map.
    pub fn parameter(&self) -> &HashMap<String, String> {
        self.parameter
    }

    /// The parameter map as a JSON object, for dotted lookup.
    pub fn parameter_view(&self) -> &Value {
        &self.parameter_view
    }

    /// The current reading of the document, for `self` lookups.
    pub fn document(&self) -> &DocumentView {
        &self.document
    }

    /// Replace the document view; called between passes, never during one.
    pub fn set_document(&mut self, document: DocumentView) {
        self.document = document;
    }
}
