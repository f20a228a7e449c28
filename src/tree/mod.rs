//! Rooted taxonomy tree construction
//!
//! External taxon identifiers stay opaque labels; internally every vertex
//! is a dense index `0..n`, which keeps the traversal and RMQ structures
//! flat vectors instead of hash lookups.

mod builder;
mod labels;

pub use builder::{Tree, TreeBuilder};
pub use labels::{Label, VertexIndex};
