//! Miette diagnostic wrapper for template syntax errors.

use miette::{Diagnostic, NamedSource, SourceSpan};
use preconfig::ParseError;
use thiserror::Error;

/// A miette-compatible diagnostic for template syntax errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(preconfig::syntax))]
pub struct SyntaxDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("opened here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl SyntaxDiagnostic {
    /// Create a diagnostic from a ParseError with source context.
    pub fn new(name: &str, content: &str, error: &ParseError) -> Self {
        let (offset, help) = match error {
            ParseError::UnmatchedOpening { offset } => (
                *offset,
                Some("every ${ needs a matching }; escape a literal one as \\${".to_string()),
            ),
        };

        // Clamp to content length to avoid miette panic on out-of-bounds.
        let offset = offset.min(content.len());
        let length = content.len().saturating_sub(offset).min(2);

        SyntaxDiagnostic {
            src: NamedSource::new(name, content.to_string()),
            span: (offset, length).into(),
            message: error.to_string(),
            help,
        }
    }
}
