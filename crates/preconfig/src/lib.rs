//! Configuration template transpiler.
//!
//! A template is plain text, JSON, or YAML with embedded control
//! expressions of the form `${source:path}` or `${source(args):path}`.
//! Resolution consults runtime sources - caller parameters (`para`), the
//! process environment (`env`), files on disk (`file`), the document
//! itself (`self`), and base64 codecs - and produces a fully resolved
//! string. `self:` references may point at parts of the document that are
//! themselves still unresolved; passes repeat until everything settles.

pub mod document;
pub mod format;
pub mod parser;
pub mod resolver;
mod template;

pub use document::DocumentView;
pub use format::{FormatError, OutputFormat, reformat};
pub use parser::{Ast, Control, Node, ParseError};
pub use resolver::{Context, Resolution, ResolveError, SourceKind};
pub use template::Template;

/// Creates a `HashMap<String, String>` from key-value pairs.
///
/// Keys and values are converted with `to_string`, so string literals and
/// anything `Display` work directly.
///
/// # Example
///
/// ```
/// use preconfig::params;
///
/// let p = params! { "host" => "localhost", "port" => 8080 };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p["port"], "8080");
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        ::std::collections::HashMap::<String, String>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, String>::new();
            $(
                map.insert($key.to_string(), $value.to_string());
            )+
            map
        }
    };
}
