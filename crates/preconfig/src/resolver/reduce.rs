//! One reduction pass over node sequences.
//!
//! A pass works bottom-up: a control's arguments and path reduce first, and
//! only once every one of them has collapsed to plain text does the control
//! itself dispatch to its source. Whatever resolves becomes a literal;
//! adjacent literals merge so the next pass sees structural progress.

use crate::parser::{Control, Node};
use crate::resolver::context::Context;
use crate::resolver::error::ResolveError;
use crate::resolver::source::{Resolution, ResolvedControl, SourceKind};

/// Reduce a node sequence by one pass and coalesce adjacent literals.
pub fn reduce(nodes: &[Node], ctx: &Context<'_>) -> Result<Vec<Node>, ResolveError> {
    let mut reduced = Vec::with_capacity(nodes.len());
    for node in nodes {
        reduced.push(reduce_node(node, ctx)?);
    }
    Ok(merge_literals(reduced))
}

/// Reduce a single node.
///
/// A control whose arguments or path are not yet plain text, or whose
/// source name is unknown, or whose source reports pending, is carried
/// forward with its reduced children so later passes pick up where this
/// one left off.
fn reduce_node(node: &Node, ctx: &Context<'_>) -> Result<Node, ResolveError> {
    let control = match node {
        Node::Literal(_) => return Ok(node.clone()),
        Node::Control(control) => control,
    };

    let arguments = control
        .arguments
        .as_ref()
        .map(|arguments| {
            arguments
                .iter()
                .map(|argument| reduce(argument, ctx))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;
    let path = control
        .path
        .as_ref()
        .map(|path| reduce(path, ctx))
        .transpose()?;

    let argument_strings = arguments
        .as_ref()
        .map(|arguments| arguments.iter().map(|a| stringify(a)).collect::<Option<Vec<_>>>());
    let path_string = path.as_ref().map(|path| stringify(path));

    let carried = Node::Control(Control {
        name: control.name.clone(),
        segment: control.segment.clone(),
        arguments,
        path,
    });

    // Absent stays absent; a present child that has not collapsed yet
    // defers the whole control to a later pass.
    let argument_strings = match argument_strings {
        None => None,
        Some(Some(strings)) => Some(strings),
        Some(None) => return Ok(carried),
    };
    let path_string = match path_string {
        None => None,
        Some(Some(text)) => Some(text),
        Some(None) => return Ok(carried),
    };

    let Some(source) = SourceKind::from_name(&control.name) else {
        return Ok(carried);
    };

    let resolved = ResolvedControl {
        name: &control.name,
        segment: &control.segment,
        arguments: argument_strings,
        path: path_string,
    };
    match source.execute(&resolved, ctx)? {
        Resolution::Resolved(text) => Ok(Node::Literal(text)),
        Resolution::Pending => Ok(carried),
    }
}

/// Merge adjacent literal nodes into single nodes.
fn merge_literals(nodes: Vec<Node>) -> Vec<Node> {
    let mut result = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            Node::Literal(text) => {
                if let Some(Node::Literal(previous)) = result.last_mut() {
                    previous.push_str(&text);
                } else {
                    result.push(Node::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Concatenate segments iff every node in the sequence is a literal.
pub fn stringify(nodes: &[Node]) -> Option<String> {
    if nodes.iter().all(Node::is_literal) {
        Some(flatten(nodes))
    } else {
        None
    }
}

/// Concatenate segments verbatim, resolved or not.
pub fn flatten(nodes: &[Node]) -> String {
    nodes.iter().map(Node::segment).collect()
}

/// Total node count, through arguments and paths.
///
/// Every successful resolve strictly shrinks this number, which is what
/// lets the fixpoint driver detect a stalled pass.
pub fn leaf_count(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::Literal(_) => 1,
            Node::Control(control) => {
                1 + control
                    .arguments
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(|argument| leaf_count(argument))
                    .sum::<usize>()
                    + control.path.as_deref().map_or(0, leaf_count)
            }
        })
        .sum()
}
