//! Templates and the fixpoint resolution driver.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::document::DocumentView;
use crate::parser::{self, Ast, ParseError};
use crate::resolver::{Context, ResolveError, flatten, leaf_count, reduce, stringify};

/// A parsed template, ready to resolve any number of times.
///
/// Construction parses the text once; each [`resolve`](Template::resolve)
/// call owns its own context and node tree, so a template is freely shared.
///
/// # Example
///
/// ```
/// use preconfig::{Template, params};
///
/// let template = Template::new("Hello, ${para:name}!", ".").unwrap();
/// let resolved = template.resolve(&params! { "name" => "world" }).unwrap();
/// assert_eq!(resolved, "Hello, world!");
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    ast: Ast,
    cwd: PathBuf,
}

impl Template {
    /// Parse a template rooted at `cwd`.
    ///
    /// Relative `file` references resolve against `cwd`.
    ///
    /// # Errors
    ///
    /// Fails when an opening `${` has no matching `}`.
    pub fn new(content: impl Into<String>, cwd: impl Into<PathBuf>) -> Result<Self, ParseError> {
        let content = content.into();
        let ast = parser::parse(&content)?;
        Ok(Self {
            ast,
            cwd: cwd.into(),
        })
    }

    /// Read and parse a template file, rooted at the file's directory.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing or unreadable, or when its content
    /// does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ResolveError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ResolveError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => ResolveError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let cwd = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok(Self::new(content, cwd)?)
    }

    /// The original template text.
    pub fn content(&self) -> &str {
        &self.ast.content
    }

    /// The directory relative `file` references resolve against.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Resolve every control in the template against `parameter`, the
    /// process environment, the filesystem, and the document itself.
    ///
    /// Passes repeat as long as they make progress, with the document view
    /// rebuilt in between so `self:` references see what has resolved so
    /// far. Progress is measured by the total node count: every successful
    /// resolve shrinks it, so a pass that leaves it unchanged is the end.
    ///
    /// # Errors
    ///
    /// Fails when controls remain once no pass makes progress (listing
    /// every unresolved segment), and on hard source failures: a missing
    /// file, a `self:` reference into plain text, or a malformed header
    /// arity.
    pub fn resolve(&self, parameter: &HashMap<String, String>) -> Result<String, ResolveError> {
        let mut ctx = Context::new(
            &self.cwd,
            parameter,
            DocumentView::parse(&self.ast.content),
        );

        let mut leaves = leaf_count(&self.ast.nodes);
        let mut nodes = reduce(&self.ast.nodes, &ctx)?;

        while nodes.len() > 1 && leaf_count(&nodes) != leaves {
            ctx.set_document(DocumentView::parse(&flatten(&nodes)));
            leaves = leaf_count(&nodes);
            nodes = reduce(&nodes, &ctx)?;
        }

        stringify(&nodes).ok_or_else(|| ResolveError::Unresolvable {
            segments: nodes
                .iter()
                .filter(|node| !node.is_literal())
                .map(|node| node.segment().to_string())
                .collect(),
        })
    }
}
