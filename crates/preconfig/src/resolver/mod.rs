//! Control resolution: sources, context, and the reduction pass.
//!
//! Sources turn fully-reduced controls into strings; the reduction pass
//! drives them bottom-up over the node tree. The fixpoint loop that repeats
//! passes until nothing changes lives with [`crate::Template`].

mod context;
mod error;
mod reduce;
mod source;

pub use context::Context;
pub use error::ResolveError;
pub use reduce::{flatten, leaf_count, reduce, stringify};
pub use source::{Resolution, ResolvedControl, SourceKind};
