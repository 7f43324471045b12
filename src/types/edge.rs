//! Edge identities shared by metaedges and edges.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

use super::direction::Direction;
use super::kind::{Kind, NodeId};

/// Identity of a node at either graph level.
///
/// Implemented by [`Kind`] (metanodes) and [`NodeId`] (instance nodes).
pub trait NodeKey: Clone + Eq + Ord + Hash + fmt::Debug + fmt::Display {}

impl NodeKey for Kind {}
impl NodeKey for NodeId {}

/// Identity of a directed, typed edge: `(source, target, kind, direction)`.
///
/// The inverse identity is derivable from the tuple alone, so edges and their
/// inverses can reference each other by key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeTuple<N> {
    /// Source endpoint.
    pub source: N,
    /// Target endpoint.
    pub target: N,
    /// Relation kind.
    pub kind: Kind,
    /// Direction of the relation.
    pub direction: Direction,
}

/// Identity of a metaedge.
pub type MetaEdgeId = EdgeTuple<Kind>;

/// Identity of an instance edge.
pub type EdgeId = EdgeTuple<NodeId>;

impl<N: NodeKey> EdgeTuple<N> {
    /// Create a new edge identity.
    pub fn new(source: N, target: N, kind: impl Into<Kind>, direction: Direction) -> Self {
        Self {
            source,
            target,
            kind: kind.into(),
            direction,
        }
    }

    /// Identity of the inverse edge: endpoints swapped, direction inverted.
    pub fn inverse(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            kind: self.kind.clone(),
            direction: self.direction.inverse(),
        }
    }

    /// Whether this identity equals its own inverse (undirected self-loop).
    pub fn is_self_inverse(&self) -> bool {
        self.source == self.target && self.direction == Direction::Both
    }

    /// Render with unicode arrows: `source→kind→target`.
    pub fn unicode_str(&self) -> String {
        let d = self.direction.unicode_symbol();
        format!("{}{d}{}{d}{}", self.source, self.kind, self.target)
    }
}

impl MetaEdgeId {
    /// Build a metaedge identity from kind names.
    pub fn from_kinds(
        source: impl Into<Kind>,
        target: impl Into<Kind>,
        kind: impl Into<Kind>,
        direction: Direction,
    ) -> Self {
        Self::new(source.into(), target.into(), kind, direction)
    }
}

impl<N: fmt::Display> fmt::Display for EdgeTuple<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.direction.symbol();
        write!(f, "{} {d} {} {d} {}", self.source, self.kind, self.target)
    }
}

// Canonical ordering: source, then target, then kind, then direction
impl<N: Ord> PartialOrd for EdgeTuple<N> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: Ord> Ord for EdgeTuple<N> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.source
            .cmp(&other.source)
            .then_with(|| self.target.cmp(&other.target))
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.direction.cmp(&other.direction))
    }
}
