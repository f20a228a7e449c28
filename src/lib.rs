//! # Taxonomic LCA classification engine
//!
//! This library collapses a set of taxon hits (one per k-mer match of a
//! sequencing read) into the single most specific common ancestor in a
//! rooted taxonomy tree — the classic lowest-common-ancestor reduction
//! step of taxonomic read classification.
//!
//! ## Core algorithm
//!
//! 1. **Tree construction**: intern external taxon labels into dense
//!    indices and accumulate parent→child edges with a single-root check
//! 2. **Euler linearization**: one iterative depth-first walk producing
//!    the `euler`/`depth`/`first_occurrence` triple of length `2n − 1`
//! 3. **Sparse-table RMQ**: O(n log n) preprocessing over the depth
//!    sequence, after which any range minimum is answered in O(1)
//! 4. **Query folding**: a k-hit read reduces in O(k) via a strict
//!    left-to-right fold of pairwise LCA calls
//!
//! ## Usage example
//!
//! ```
//! use taxlca::LcaEngine;
//!
//! let engine = LcaEngine::from_edges([(1u32, 2), (1, 3), (2, 4), (2, 5)])?;
//! assert_eq!(engine.lca(&4, &5)?, 2);
//! assert_eq!(engine.fold_lca(&[4, 5, 3])?, 1);
//! # Ok::<(), taxlca::LcaError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules - each implements one stage of the pipeline
pub mod tree;     // Label interning and rooted-tree construction
pub mod lca;      // Euler tour, sparse-table RMQ, query engine
pub mod classify; // Edge/query stream parsing and read classification

// Re-exports for convenience
pub use classify::{
    classify_reads, read_tree, ClassifySummary, QueryGroup, QueryGroups, QueryRecord,
};
pub use lca::{EulerTour, LcaEngine, SparseTableRmq};
pub use tree::{Label, Tree, TreeBuilder, VertexIndex};

use thiserror::Error;

/// Errors raised while building a taxonomy tree or answering LCA queries.
///
/// Construction-time kinds ([`NoRootFound`](LcaError::NoRootFound),
/// [`AmbiguousRoot`](LcaError::AmbiguousRoot),
/// [`CyclicParentage`](LcaError::CyclicParentage)) are fatal — there is no
/// valid tree to proceed with. Query-time kinds
/// ([`UnknownVertex`](LcaError::UnknownVertex),
/// [`VertexUnreachable`](LcaError::VertexUnreachable)) affect a single read
/// and are skippable by the classification driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LcaError {
    /// An input line did not parse into the expected fields.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput {
        /// 1-based line number within the offending stream.
        line: usize,
        /// Human-readable description of the parse failure.
        reason: String,
    },

    /// An LCA query referenced a label never seen in any tree edge.
    #[error("unknown vertex '{0}'")]
    UnknownVertex(String),

    /// Every vertex has a parent, so the edge list contains a cycle or is
    /// missing its root edge.
    #[error("no root found: every vertex has a parent")]
    NoRootFound,

    /// More than one vertex has no parent (disconnected forest).
    #[error("ambiguous root: both '{first}' and '{second}' lack a parent")]
    AmbiguousRoot {
        /// First parentless vertex encountered.
        first: String,
        /// Second parentless vertex encountered.
        second: String,
    },

    /// A vertex was assigned a second parent or a self-loop edge.
    #[error("cyclic parentage: vertex '{vertex}' already has a parent")]
    CyclicParentage {
        /// The vertex that received the conflicting edge.
        vertex: String,
    },

    /// The vertex exists in the index but was never reached by the Euler
    /// tour (disconnected component).
    #[error("vertex '{0}' is unreachable from the root")]
    VertexUnreachable(String),

    /// A range-minimum query was issued against an empty table.
    #[error("sparse table queried before initialization")]
    NotInitialized,

    /// A fold was requested over zero labels.
    #[error("empty query: fold requires at least one label")]
    EmptyQuery,

    /// An internal index was decoded that was never allocated.
    #[error("unknown internal index {0}")]
    UnknownIndex(usize),
}
