//! LCA query engine
//!
//! Composes the Euler tour and the sparse-table RMQ into O(1) pairwise
//! lowest-common-ancestor queries after O(n log n) preprocessing. All
//! structures are built exactly once and never mutated; queries take
//! `&self` and perform no writes, so a built engine may be shared freely
//! across threads.

mod euler;
mod rmq;

pub use euler::EulerTour;
pub use rmq::SparseTableRmq;

use tracing::info;

use crate::tree::{Label, Tree, TreeBuilder, VertexIndex};
use crate::LcaError;

/// Immutable lowest-common-ancestor engine over a rooted taxonomy tree.
///
/// Built once from a [`TreeBuilder`]; adding vertices afterwards requires
/// a rebuild from scratch — there is no incremental update.
#[derive(Debug, Clone)]
pub struct LcaEngine<L> {
    index: VertexIndex<L>,
    tree: Tree,
    tour: EulerTour,
    rmq: SparseTableRmq,
}

impl<L: Label> LcaEngine<L> {
    /// Freeze `builder` and run the full preprocessing pipeline: root
    /// validation, Euler walk, sparse-table construction.
    pub fn build(builder: TreeBuilder<L>) -> Result<Self, LcaError> {
        let (index, tree) = builder.build()?;
        let tour = EulerTour::traverse(&tree);
        let rmq = SparseTableRmq::build(tour.depths());
        info!(
            vertices = tree.len(),
            tour_len = tour.len(),
            max_depth = tour.max_depth(),
            "LCA engine built"
        );
        Ok(Self {
            index,
            tree,
            tour,
            rmq,
        })
    }

    /// Convenience constructor from `(father, son)` pairs.
    pub fn from_edges<I>(edges: I) -> Result<Self, LcaError>
    where
        I: IntoIterator<Item = (L, L)>,
    {
        let mut builder = TreeBuilder::new();
        for (father, son) in edges {
            builder.add_edge(&father, &son)?;
        }
        Self::build(builder)
    }

    fn resolve(&self, label: &L) -> Result<usize, LcaError> {
        self.index
            .get(label)
            .ok_or_else(|| LcaError::UnknownVertex(label.to_string()))
    }

    fn tour_position(&self, vertex: usize) -> Result<usize, LcaError> {
        match self.tour.first_occurrence(vertex) {
            Some(pos) => Ok(pos),
            None => Err(LcaError::VertexUnreachable(
                self.index.label(vertex)?.to_string(),
            )),
        }
    }

    /// Lowest common ancestor of `u` and `v`.
    ///
    /// Equal labels short-circuit without an RMQ call. Fails with
    /// [`LcaError::UnknownVertex`] for a label never seen in an edge and
    /// [`LcaError::VertexUnreachable`] for one outside the root's
    /// component.
    pub fn lca(&self, u: &L, v: &L) -> Result<L, LcaError> {
        let ui = self.resolve(u)?;
        let vi = self.resolve(v)?;
        if ui == vi {
            return Ok(self.index.label(ui)?.clone());
        }
        let fu = self.tour_position(ui)?;
        let fv = self.tour_position(vi)?;
        let pos = self.rmq.query(fu.min(fv), fu.max(fv))?;
        Ok(self.index.label(self.tour.vertex_at(pos))?.clone())
    }

    /// Collapse an ordered sequence of labels into their common ancestor
    /// by a strict left-to-right fold of [`lca`](Self::lca).
    ///
    /// A single label is returned unchanged without touching the tree; an
    /// empty sequence fails with [`LcaError::EmptyQuery`]. Fold order is
    /// fixed for determinism, though any order yields the same ancestor.
    pub fn fold_lca(&self, labels: &[L]) -> Result<L, LcaError> {
        let (first, rest) = labels.split_first().ok_or(LcaError::EmptyQuery)?;
        let Some(second) = rest.first() else {
            return Ok(first.clone());
        };
        let mut accumulator = self.lca(first, second)?;
        for label in &rest[1..] {
            accumulator = self.lca(&accumulator, label)?;
        }
        Ok(accumulator)
    }

    /// Number of vertices in the tree.
    pub fn num_vertices(&self) -> usize {
        self.tree.len()
    }

    /// Label of the root vertex.
    pub fn root(&self) -> Result<&L, LcaError> {
        self.index.label(self.tree.root())
    }

    /// Length of the Euler tour (`2·reached − 1`).
    pub fn tour_len(&self) -> usize {
        self.tour.len()
    }

    /// Depth of the deepest reached vertex, root depth 0.
    pub fn max_depth(&self) -> usize {
        self.tour.max_depth()
    }

    /// Depth of `label` in the tree.
    pub fn depth_of(&self, label: &L) -> Result<usize, LcaError> {
        let vertex = self.resolve(label)?;
        let pos = self.tour_position(vertex)?;
        Ok(self.tour.depths()[pos])
    }
}
