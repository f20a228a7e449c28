use crate::tree::{Label, VertexIndex};
use crate::LcaError;

/// Accumulates parent→child edges over interned vertices and validates the
/// single-root invariant when frozen into a [`Tree`].
#[derive(Debug, Clone)]
pub struct TreeBuilder<L> {
    index: VertexIndex<L>,
    parent: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
}

impl<L: Label> TreeBuilder<L> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            index: VertexIndex::new(),
            parent: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Intern `label` and grow the parallel parent/children tables.
    fn touch(&mut self, label: &L) -> usize {
        let idx = self.index.intern(label);
        if idx == self.parent.len() {
            self.parent.push(None);
            self.children.push(Vec::new());
        }
        idx
    }

    /// Register a vertex without attaching an edge.
    ///
    /// Only needed for the degenerate single-vertex tree, which has no
    /// edges to introduce its root.
    pub fn add_vertex(&mut self, label: &L) -> usize {
        self.touch(label)
    }

    /// Record the edge `father → son`, interning both labels.
    ///
    /// A `son` that already has a recorded parent is rejected with
    /// [`LcaError::CyclicParentage`] rather than silently reparented, as is
    /// a self-loop. Children keep the order their edges were added in.
    pub fn add_edge(&mut self, father: &L, son: &L) -> Result<(), LcaError> {
        if father == son {
            return Err(LcaError::CyclicParentage {
                vertex: son.to_string(),
            });
        }
        let f = self.touch(father);
        let s = self.touch(son);
        if self.parent[s].is_some() {
            return Err(LcaError::CyclicParentage {
                vertex: son.to_string(),
            });
        }
        self.parent[s] = Some(f);
        self.children[f].push(s);
        Ok(())
    }

    /// Number of distinct vertices seen so far.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether no vertex has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Freeze the builder into an immutable [`Tree`] plus the label index.
    ///
    /// Fails with [`LcaError::NoRootFound`] when every vertex has a parent
    /// (cycle, or missing root edge — also the empty builder) and with
    /// [`LcaError::AmbiguousRoot`] when more than one vertex lacks one
    /// (disconnected forest).
    pub fn build(self) -> Result<(VertexIndex<L>, Tree), LcaError> {
        let mut root = None;
        for (idx, parent) in self.parent.iter().enumerate() {
            if parent.is_some() {
                continue;
            }
            match root {
                None => root = Some(idx),
                Some(first) => {
                    return Err(LcaError::AmbiguousRoot {
                        first: self.index.label(first)?.to_string(),
                        second: self.index.label(idx)?.to_string(),
                    })
                }
            }
        }
        let root = root.ok_or(LcaError::NoRootFound)?;
        Ok((
            self.index,
            Tree {
                parent: self.parent,
                children: self.children,
                root,
            },
        ))
    }
}

/// Frozen rooted tree over dense vertex indices.
///
/// Adjacency is an owned list per vertex; the parent table is kept for
/// ancestor walks in validation and tests. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Tree {
    parent: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    root: usize,
}

impl Tree {
    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// A built tree always has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the unique root vertex.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Parent of `vertex`, `None` for the root.
    pub fn parent(&self, vertex: usize) -> Option<usize> {
        self.parent.get(vertex).copied().flatten()
    }

    /// Children of `vertex` in edge-insertion order.
    pub fn children(&self, vertex: usize) -> &[usize] {
        &self.children[vertex]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_with_edges(edges: &[(u32, u32)]) -> TreeBuilder<u32> {
        let mut builder = TreeBuilder::new();
        for (father, son) in edges {
            builder.add_edge(father, son).unwrap();
        }
        builder
    }

    #[test]
    fn builds_simple_tree_with_root() {
        let builder = builder_with_edges(&[(1, 2), (1, 3), (2, 4), (2, 5)]);
        let (index, tree) = builder.build().unwrap();
        assert_eq!(tree.len(), 5);
        assert_eq!(index.label(tree.root()).unwrap(), &1);
        assert_eq!(tree.parent(tree.root()), None);
    }

    #[test]
    fn children_keep_insertion_order() {
        let builder = builder_with_edges(&[(1, 3), (1, 2), (1, 4)]);
        let (index, tree) = builder.build().unwrap();
        let labels: Vec<u32> = tree
            .children(tree.root())
            .iter()
            .map(|&c| *index.label(c).unwrap())
            .collect();
        assert_eq!(labels, vec![3, 2, 4]);
    }

    #[test]
    fn single_vertex_tree_is_legal() {
        let mut builder = TreeBuilder::new();
        builder.add_vertex(&7u32);
        let (index, tree) = builder.build().unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(index.label(tree.root()).unwrap(), &7);
    }

    #[test]
    fn empty_builder_has_no_root() {
        let builder: TreeBuilder<u32> = TreeBuilder::new();
        assert_eq!(builder.build().unwrap_err(), LcaError::NoRootFound);
    }

    #[test]
    fn cycle_leaves_no_root() {
        let mut builder = TreeBuilder::new();
        builder.add_edge(&1u32, &2).unwrap();
        builder.add_edge(&2, &1).unwrap();
        assert_eq!(builder.build().unwrap_err(), LcaError::NoRootFound);
    }

    #[test]
    fn second_parent_is_rejected() {
        let mut builder = builder_with_edges(&[(1, 2), (1, 3)]);
        let err = builder.add_edge(&3, &2).unwrap_err();
        assert_eq!(
            err,
            LcaError::CyclicParentage {
                vertex: "2".to_string()
            }
        );
    }

    #[test]
    fn duplicate_edge_is_rejected() {
        let mut builder = builder_with_edges(&[(1, 2)]);
        assert!(matches!(
            builder.add_edge(&1, &2),
            Err(LcaError::CyclicParentage { .. })
        ));
    }

    #[test]
    fn self_loop_is_rejected() {
        let mut builder = TreeBuilder::new();
        assert!(matches!(
            builder.add_edge(&5u32, &5),
            Err(LcaError::CyclicParentage { .. })
        ));
    }

    #[test]
    fn forest_is_ambiguous() {
        let builder = builder_with_edges(&[(1, 2), (3, 4)]);
        assert_eq!(
            builder.build().unwrap_err(),
            LcaError::AmbiguousRoot {
                first: "1".to_string(),
                second: "3".to_string()
            }
        );
    }
}
