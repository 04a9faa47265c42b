//! Template parser: marker location and AST construction.
//!
//! [`locate_markers`] finds matched `${ ... }` pairs in raw text, honoring
//! backslash escapes and nesting. [`parse`] turns the text into a tree of
//! [`Node`]s whose arguments and paths are themselves node sequences.

pub mod ast;
pub mod error;
mod header;
mod marker;

pub use ast::{Ast, Control, Node, parse};
pub use error::ParseError;
pub use marker::{Delimiters, Marker, locate_markers, locate_markers_with};
