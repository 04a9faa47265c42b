//! Control header parser using winnow.
//!
//! Parses the text between `${` and the matching `}`:
//! a source name, an optional parenthesized argument list, and an optional
//! `:`-prefixed path, with whitespace tolerated around every piece. The
//! argument list is carved out with the bracket locator so nested
//! parentheses pair up correctly.

use winnow::combinator::{opt, preceded};
use winnow::prelude::*;
use winnow::token::take_while;

use super::marker::{Delimiters, locate_markers_with};

/// A control header before recursion into its arguments and path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawHeader {
    pub name: String,
    /// `None` when no `( ... )` group was present; `Some(vec![])` for `()`.
    pub arguments: Option<Vec<String>>,
    /// `None` when no `:` was present; `Some("")` for a bare trailing `:`.
    pub path: Option<String>,
}

/// Parse the inside of a control (delimiters already stripped).
///
/// Returns `None` when the text does not form a header; the caller then
/// keeps the whole segment as literal text.
pub(crate) fn parse_header(inner: &str) -> Option<RawHeader> {
    let mut input = inner;
    match header(&mut input) {
        Ok(parsed) if input.is_empty() => Some(parsed),
        _ => None,
    }
}

/// Parse a header: ws IDENT ws ( `(` args `)` )? ws ( `:` PATH )? ws
fn header(input: &mut &str) -> ModalResult<RawHeader> {
    let _ = ws(input)?;
    let name = identifier(input)?.to_string();
    let _ = ws(input)?;
    let arguments = opt(argument_group).parse_next(input)?;
    let _ = ws(input)?;
    let path = opt(preceded(':', path_text)).parse_next(input)?;
    let _ = ws(input)?;
    Ok(RawHeader {
        name,
        arguments,
        path,
    })
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

/// Parse a source identifier (word characters).
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

/// Parse a parenthesized argument list into raw comma-separated tokens.
///
/// The matching `)` is found with the bracket locator so nested pairs and
/// escaped parentheses are respected. Tokens are trimmed; a blank group
/// yields an empty list.
fn argument_group(input: &mut &str) -> ModalResult<Vec<String>> {
    if !input.starts_with('(') {
        return Err(backtrack());
    }

    let markers = locate_markers_with(
        input,
        Delimiters {
            opening: "(",
            closing: ")",
        },
    )
    .map_err(|_| backtrack())?;

    let group = markers
        .iter()
        .find(|marker| marker.open == 0)
        .ok_or_else(backtrack)?;

    let enclosed = &input[1..group.close];
    *input = &input[group.close + 1..];
    Ok(split_arguments(enclosed))
}

fn split_arguments(enclosed: &str) -> Vec<String> {
    if enclosed.trim().is_empty() {
        return Vec::new();
    }
    enclosed
        .split(',')
        .map(|token| token.trim().to_string())
        .collect()
}

/// Parse the path: everything left in the header, trimmed.
fn path_text(input: &mut &str) -> ModalResult<String> {
    let rest: &str = take_while(0.., |_: char| true).parse_next(input)?;
    Ok(rest.trim().to_string())
}

fn backtrack() -> winnow::error::ErrMode<winnow::error::ContextError> {
    winnow::error::ErrMode::Backtrack(winnow::error::ContextError::new())
}
