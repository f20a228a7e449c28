use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::LcaError;

/// Bound for types usable as external vertex labels.
///
/// Satisfied by integers, `String`, `&str` and anything else hashable,
/// cloneable and printable. Blanket-implemented; never implement manually.
pub trait Label: Eq + Hash + Clone + Display {}

impl<T: Eq + Hash + Clone + Display> Label for T {}

/// Bidirectional mapping between external vertex labels and dense internal
/// indices `0..n`.
///
/// Indices are allocated in first-seen order and never reused or
/// reassigned; the label↔index mapping is a bijection fixed once the tree
/// is built. There is no removal operation — the mapping only grows.
#[derive(Debug, Clone)]
pub struct VertexIndex<L> {
    encode: HashMap<L, usize>,
    decode: Vec<L>,
}

impl<L: Label> VertexIndex<L> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            encode: HashMap::new(),
            decode: Vec::new(),
        }
    }

    /// Return the index for `label`, allocating the next unused one on
    /// first sight. Idempotent for repeated labels.
    pub fn intern(&mut self, label: &L) -> usize {
        if let Some(&idx) = self.encode.get(label) {
            return idx;
        }
        let idx = self.decode.len();
        self.encode.insert(label.clone(), idx);
        self.decode.push(label.clone());
        idx
    }

    /// Look up the index for `label` without allocating.
    pub fn get(&self, label: &L) -> Option<usize> {
        self.encode.get(label).copied()
    }

    /// Inverse lookup: the label stored for `idx`.
    pub fn label(&self, idx: usize) -> Result<&L, LcaError> {
        self.decode.get(idx).ok_or(LcaError::UnknownIndex(idx))
    }

    /// Number of distinct labels interned so far.
    pub fn len(&self) -> usize {
        self.decode.len()
    }

    /// Whether no label has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.decode.is_empty()
    }
}
