use tracing::debug;

use crate::tree::Tree;

/// One pending vertex on the explicit DFS stack.
struct Frame {
    vertex: usize,
    cursor: usize,
    depth: usize,
}

/// Euler linearization of a rooted tree.
///
/// A depth-first walk emits each vertex on first entry and again after each
/// child subtree returns, so the tour has `2n − 1` entries for `n` reached
/// vertices and the LCA of two vertices is the minimum-depth entry between
/// their first occurrences. The re-emission after every child is what makes
/// that range-minimum reduction correct.
#[derive(Debug, Clone)]
pub struct EulerTour {
    euler: Vec<usize>,
    depth: Vec<usize>,
    first_occurrence: Vec<Option<usize>>,
}

impl EulerTour {
    /// Walk `tree` from its root with an explicit stack.
    ///
    /// Iterative on purpose: taxonomy dumps can be pathologically deep and
    /// recursion depth would then track tree depth.
    pub fn traverse(tree: &Tree) -> Self {
        let n = tree.len();
        let mut euler = Vec::with_capacity(2 * n - 1);
        let mut depth = Vec::with_capacity(2 * n - 1);
        let mut first_occurrence = vec![None; n];

        let root = tree.root();
        first_occurrence[root] = Some(0);
        euler.push(root);
        depth.push(0);

        let mut stack = vec![Frame {
            vertex: root,
            cursor: 0,
            depth: 0,
        }];
        while let Some(top) = stack.last_mut() {
            if let Some(&child) = tree.children(top.vertex).get(top.cursor) {
                top.cursor += 1;
                let child_depth = top.depth + 1;
                if first_occurrence[child].is_none() {
                    first_occurrence[child] = Some(euler.len());
                }
                euler.push(child);
                depth.push(child_depth);
                stack.push(Frame {
                    vertex: child,
                    cursor: 0,
                    depth: child_depth,
                });
            } else {
                stack.pop();
                // Re-emit the parent after the finished child subtree.
                if let Some(parent) = stack.last() {
                    euler.push(parent.vertex);
                    depth.push(parent.depth);
                }
            }
        }

        debug!(vertices = n, tour_len = euler.len(), "euler walk complete");
        Self {
            euler,
            depth,
            first_occurrence,
        }
    }

    /// Number of tour entries (`2·reached − 1`).
    pub fn len(&self) -> usize {
        self.euler.len()
    }

    /// A tour over a built tree is never empty.
    pub fn is_empty(&self) -> bool {
        self.euler.is_empty()
    }

    /// Vertex index occupying tour position `pos`.
    pub fn vertex_at(&self, pos: usize) -> usize {
        self.euler[pos]
    }

    /// Tree depths parallel to the tour, root depth 0.
    pub fn depths(&self) -> &[usize] {
        &self.depth
    }

    /// Earliest tour position of `vertex`, `None` if the walk never
    /// reached it (disconnected component).
    pub fn first_occurrence(&self, vertex: usize) -> Option<usize> {
        self.first_occurrence.get(vertex).copied().flatten()
    }

    /// Deepest level touched by the walk.
    pub fn max_depth(&self) -> usize {
        self.depth.iter().copied().max().unwrap_or(0)
    }
}
