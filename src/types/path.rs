//! Contiguous edge sequences shared by metapaths and instance paths.

use serde::Serialize;
use std::fmt;

use crate::error::{HetnetError, Result};
use super::edge::{EdgeTuple, NodeKey};
use super::mask::{MaskElement, MaskIndex};

/// An ordered, non-empty, contiguous sequence of edges.
///
/// For every adjacent pair the first edge's target equals the second edge's
/// source. Equality and hashing are by the exact edge sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Path<N> {
    edges: Vec<EdgeTuple<N>>,
}

impl<N: NodeKey> Path<N> {
    /// Create a path, rejecting empty and non-contiguous sequences.
    pub fn new(edges: Vec<EdgeTuple<N>>) -> Result<Self> {
        if edges.is_empty() {
            return Err(HetnetError::invariant("a path needs at least one edge"));
        }
        for pair in edges.windows(2) {
            if pair[0].target != pair[1].source {
                return Err(HetnetError::invariant(format!(
                    "non-contiguous path: `{}` is followed by `{}`",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(Self { edges })
    }

    /// Edges in walk order.
    pub fn edges(&self) -> &[EdgeTuple<N>] {
        &self.edges
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the path has no edges; `new` rejects empty sequences, so this
    /// is false for every constructed path.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate over the edges.
    pub fn iter(&self) -> std::slice::Iter<'_, EdgeTuple<N>> {
        self.edges.iter()
    }

    /// Source of the first edge.
    pub fn source(&self) -> &N {
        &self.edges[0].source
    }

    /// Target of the last edge.
    pub fn target(&self) -> &N {
        &self.edges[self.edges.len() - 1].target
    }

    /// Node sequence implied by the walk (one more than the edge count).
    pub fn nodes(&self) -> Vec<&N> {
        let mut nodes: Vec<&N> = self.edges.iter().map(|e| &e.source).collect();
        nodes.push(self.target());
        nodes
    }

    /// Inverse of every edge, in reverse order.
    pub fn inverse_edges(&self) -> Vec<EdgeTuple<N>> {
        self.edges.iter().rev().map(EdgeTuple::inverse).collect()
    }

    /// Whether `other` is a prefix of this path (and no longer than it).
    pub fn has_prefix(&self, other: &Path<N>) -> bool {
        other.len() <= self.len() && self.edges[..other.len()] == other.edges[..]
    }

    /// First candidate that is a prefix of this path, in candidate order.
    pub fn max_overlap<'a, P>(&self, candidates: impl IntoIterator<Item = &'a P>) -> Option<&'a P>
    where
        P: AsRef<Path<N>> + 'a,
    {
        candidates
            .into_iter()
            .find(|candidate| self.has_prefix(candidate.as_ref()))
    }

    /// Every maskable element along the path: each edge, its source, and
    /// finally the path target.
    pub fn mask_elements(&self) -> impl Iterator<Item = MaskElement<'_, N>> {
        self.edges
            .iter()
            .flat_map(|e| [MaskElement::Edge(e), MaskElement::Node(&e.source)])
            .chain(std::iter::once(MaskElement::Node(self.target())))
    }

    /// Whether any element along the path is masked.
    pub fn is_masked<M: MaskIndex<N>>(&self, index: &M) -> Result<bool> {
        for element in self.mask_elements() {
            let masked = match element {
                MaskElement::Edge(edge) => index.is_edge_masked(edge)?,
                MaskElement::Node(node) => index.is_node_masked(node)?,
            };
            if masked {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Unicode rendering with caller-supplied node labels.
    pub fn unicode_str_with<F>(&self, label: F) -> String
    where
        F: Fn(&N) -> String,
    {
        let mut s = String::new();
        for edge in &self.edges {
            let d = edge.direction.unicode_symbol();
            s.push_str(&format!("{}{d}{}{d}", label(&edge.source), edge.kind));
        }
        s.push_str(&label(self.target()));
        s
    }
}

impl<N> AsRef<Path<N>> for Path<N> {
    fn as_ref(&self) -> &Path<N> {
        self
    }
}

impl<'a, N> IntoIterator for &'a Path<N> {
    type Item = &'a EdgeTuple<N>;
    type IntoIter = std::slice::Iter<'a, EdgeTuple<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

impl<N: NodeKey> fmt::Display for Path<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for edge in &self.edges {
            let d = edge.direction.symbol();
            write!(f, "{} {d} {} {d} ", edge.source, edge.kind)?;
        }
        write!(f, "{}", self.target())
    }
}
