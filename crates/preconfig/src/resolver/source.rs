//! Value sources for control expressions.
//!
//! Each source consumes a control whose arguments and path have already
//! been reduced to plain strings, plus the resolution context, and either
//! produces a string, reports that the control cannot be resolved yet, or
//! fails outright.

use base64::prelude::*;

use crate::document::{DocumentView, extract_value};
use crate::parser;
use crate::resolver::context::Context;
use crate::resolver::error::ResolveError;
use crate::template::Template;

/// A control whose arguments and path are fully reduced to strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedControl<'a> {
    pub name: &'a str,
    pub segment: &'a str,
    pub arguments: Option<Vec<String>>,
    pub path: Option<String>,
}

impl ResolvedControl<'_> {
    /// The path, with absent and empty treated alike.
    fn path_text(&self) -> &str {
        self.path.as_deref().unwrap_or("")
    }

    /// The first argument; arity validation guarantees it exists when read.
    fn first_argument(&self) -> &str {
        self.arguments
            .as_deref()
            .and_then(<[String]>::first)
            .map_or("", String::as_str)
    }
}

/// Outcome of a source invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The control collapsed to literal text.
    Resolved(String),
    /// Not resolvable yet; the reducer may retry on a later pass.
    Pending,
}

impl From<Option<String>> for Resolution {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(text) => Resolution::Resolved(text),
            None => Resolution::Pending,
        }
    }
}

/// Whether a source expects a path after `:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathRule {
    Required,
    Optional,
    Forbidden,
}

/// The value sources, dispatched statically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `para` - caller-supplied parameters
    Parameter,
    /// `env` - process environment
    Environment,
    /// `file` - file contents, recursively resolved as a template
    File,
    /// `self` - the document currently being resolved
    Document,
    /// `base64encode` - encode an argument
    Base64Encode,
    /// `base64decode` - decode an argument, optionally index the result
    Base64Decode,
}

impl SourceKind {
    /// Map a control's source name to a kind.
    ///
    /// Unknown names get no source at all; the reducer leaves such controls
    /// untouched and they surface as unresolvable at the fixpoint.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "para" => Some(SourceKind::Parameter),
            "env" => Some(SourceKind::Environment),
            "file" => Some(SourceKind::File),
            "self" => Some(SourceKind::Document),
            "base64encode" => Some(SourceKind::Base64Encode),
            "base64decode" => Some(SourceKind::Base64Decode),
            _ => None,
        }
    }

    /// Run the source for one fully-reduced control.
    pub fn execute(
        &self,
        control: &ResolvedControl<'_>,
        ctx: &Context<'_>,
    ) -> Result<Resolution, ResolveError> {
        match self {
            SourceKind::Parameter => parameter_source(control, ctx),
            SourceKind::Environment => environment_source(control),
            SourceKind::File => file_source(control, ctx),
            SourceKind::Document => document_source(control, ctx),
            SourceKind::Base64Encode => base64_encode_source(control),
            SourceKind::Base64Decode => base64_decode_source(control),
        }
    }
}

/// Dotted lookup in the caller's parameters.
fn parameter_source(
    control: &ResolvedControl<'_>,
    ctx: &Context<'_>,
) -> Result<Resolution, ResolveError> {
    validate(control, 0, PathRule::Required)?;
    Ok(extract_value(ctx.parameter_view(), control.path_text()).into())
}

/// Process environment lookup.
fn environment_source(control: &ResolvedControl<'_>) -> Result<Resolution, ResolveError> {
    validate(control, 0, PathRule::Required)?;
    Ok(std::env::var(control.path_text()).ok().into())
}

/// Read a file relative to the context's working directory, resolve it as a
/// template rooted at that file's directory with the same parameters, then
/// index the result.
fn file_source(
    control: &ResolvedControl<'_>,
    ctx: &Context<'_>,
) -> Result<Resolution, ResolveError> {
    validate(control, 1, PathRule::Optional)?;
    let path = ctx.cwd().join(control.first_argument());
    let template = Template::from_file(&path)?;
    let resolved = template.resolve(ctx.parameter())?;
    extract_from_raw(&resolved, control.path_text())
}

/// Dotted lookup in the document currently being resolved.
///
/// A value that still carries controls of its own is not served yet; it
/// resolves on a later pass, after the document view has caught up.
fn document_source(
    control: &ResolvedControl<'_>,
    ctx: &Context<'_>,
) -> Result<Resolution, ResolveError> {
    validate(control, 0, PathRule::Required)?;
    if ctx.document().is_text() {
        return Err(ResolveError::SelfOnText);
    }

    let Some(found) = ctx.document().extract(control.path_text()) else {
        return Ok(Resolution::Pending);
    };
    let nodes = parser::parse(&found)?.nodes;
    if nodes.iter().any(|node| !node.is_literal()) {
        return Ok(Resolution::Pending);
    }
    Ok(Resolution::Resolved(found))
}

fn base64_encode_source(control: &ResolvedControl<'_>) -> Result<Resolution, ResolveError> {
    validate(control, 1, PathRule::Forbidden)?;
    Ok(Resolution::Resolved(
        BASE64_STANDARD.encode(control.first_argument()),
    ))
}

fn base64_decode_source(control: &ResolvedControl<'_>) -> Result<Resolution, ResolveError> {
    validate(control, 1, PathRule::Optional)?;
    let decoded = String::from_utf8(BASE64_STANDARD.decode(control.first_argument())?)?;
    extract_from_raw(&decoded, control.path_text())
}

/// Check argument count and path presence against a source's shape.
///
/// An argument list on a zero-argument source is rejected even when the
/// list is empty: `${para():x}` is malformed, `${para:x}` is not.
fn validate(
    control: &ResolvedControl<'_>,
    expected: usize,
    rule: PathRule,
) -> Result<(), ResolveError> {
    match &control.arguments {
        Some(_) if expected == 0 => {
            return Err(ResolveError::UnexpectedArguments {
                name: control.name.to_string(),
            });
        }
        Some(arguments) if arguments.len() != expected => {
            return Err(ResolveError::ArgumentCount {
                name: control.name.to_string(),
                expected,
                got: arguments.len(),
            });
        }
        None if expected != 0 => {
            return Err(ResolveError::ArgumentCount {
                name: control.name.to_string(),
                expected,
                got: 0,
            });
        }
        _ => {}
    }

    match (rule, &control.path) {
        (PathRule::Required, None) => Err(ResolveError::MissingPath {
            name: control.name.to_string(),
        }),
        (PathRule::Forbidden, Some(_)) => Err(ResolveError::UnexpectedPath {
            name: control.name.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Index resolved content with a dotted path.
///
/// An empty path returns the content whole. Otherwise the content must
/// parse as something structured; plain text cannot carry a path.
fn extract_from_raw(content: &str, path: &str) -> Result<Resolution, ResolveError> {
    if path.is_empty() {
        return Ok(Resolution::Resolved(content.to_string()));
    }
    let view = DocumentView::parse(content);
    if view.is_text() {
        return Err(ResolveError::PathOnText);
    }
    Ok(view.extract(path).into())
}
