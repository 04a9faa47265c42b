//! Error types for template resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

/// An error that occurred while resolving a template.
///
/// Header arity violations (`ArgumentCount`, `UnexpectedArguments`,
/// `MissingPath`, `UnexpectedPath`) are template syntax problems that only
/// surface once the control dispatches. `Unresolvable` and `FileNotFound`
/// are reference failures. `SelfOnText` and `PathOnText` flag lookups into
/// content that has no structure to index.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A nested parse failed (a looked-up value or an included file).
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// Wrong number of arguments for a source.
    #[error("source '{name}' expects {expected} argument(s), got {got}")]
    ArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },

    /// An argument list, even an empty one, on a source that takes none.
    #[error("source '{name}' takes no arguments")]
    UnexpectedArguments { name: String },

    /// A path was required but absent.
    #[error("source '{name}' requires a path")]
    MissingPath { name: String },

    /// A path on a source that does not accept one.
    #[error("source '{name}' does not accept a path")]
    UnexpectedPath { name: String },

    /// Controls left unresolved once no pass makes further progress.
    #[error("unresolvable references:\n{}", segments.iter().map(|s| format!("- {s}")).collect::<Vec<_>>().join("\n"))]
    Unresolvable { segments: Vec<String> },

    /// A referenced file does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A referenced file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `self:` used in a template that parsed as plain text.
    #[error("cannot self reference to a text based template")]
    SelfOnText,

    /// A dotted path applied to content that parsed as plain text.
    #[error("cannot resolve a path for a non-json/yaml content")]
    PathOnText,

    /// A `base64decode` argument that is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A decoded payload that is not valid UTF-8.
    #[error("decoded payload is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
