//! Parse error types for templates.

use thiserror::Error;

/// An error that occurred while parsing a template.
#[derive(Debug, Error)]
pub enum ParseError {
    /// An opening delimiter with no matching closer.
    #[error("missing closing for the opening at {offset}")]
    UnmatchedOpening { offset: usize },
}
