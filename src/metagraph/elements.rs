//! Metanodes and metaedges.

use std::collections::BTreeSet;

use crate::error::ElementClass;
use crate::store::{EdgeElement, Element};
use crate::types::{Direction, Kind, MetaEdgeId};

/// A node kind in the metagraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaNode {
    kind: Kind,
    abbrev: String,
    /// Outgoing metaedges, inverted ones included.
    edges: BTreeSet<MetaEdgeId>,
}

impl MetaNode {
    pub(crate) fn new(kind: Kind) -> Self {
        Self {
            kind,
            abbrev: String::new(),
            edges: BTreeSet::new(),
        }
    }

    /// The node kind.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Short code for this kind.
    pub fn abbrev(&self) -> &str {
        &self.abbrev
    }

    /// Outgoing metaedges in identity order.
    pub fn edges(&self) -> &BTreeSet<MetaEdgeId> {
        &self.edges
    }

    pub(crate) fn add_edge(&mut self, id: MetaEdgeId) {
        self.edges.insert(id);
    }

    pub(crate) fn set_abbrev(&mut self, abbrev: String) {
        self.abbrev = abbrev;
    }
}

impl Element for MetaNode {
    type Id = Kind;
    const CLASS: ElementClass = ElementClass::Kind;

    fn id(&self) -> &Kind {
        &self.kind
    }
}

/// A typed relation between two kinds.
///
/// Every metaedge has an inverse reachable through [`MetaEdge::inverse_id`];
/// exactly one member of each pair is marked inverted. An undirected
/// self-loop is its own inverse and is never inverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaEdge {
    id: MetaEdgeId,
    inverted: bool,
    kind_abbrev: String,
    abbrev: String,
    standard_abbrev: String,
}

impl MetaEdge {
    pub(crate) fn new(id: MetaEdgeId, inverted: bool) -> Self {
        Self {
            id,
            inverted,
            kind_abbrev: String::new(),
            abbrev: String::new(),
            standard_abbrev: String::new(),
        }
    }

    /// Metaedge identity.
    pub fn id(&self) -> &MetaEdgeId {
        &self.id
    }

    /// Source kind.
    pub fn source(&self) -> &Kind {
        &self.id.source
    }

    /// Target kind.
    pub fn target(&self) -> &Kind {
        &self.id.target
    }

    /// Relation kind.
    pub fn kind(&self) -> &Kind {
        &self.id.kind
    }

    /// Direction of the relation.
    pub fn direction(&self) -> Direction {
        self.id.direction
    }

    /// Whether this is the inverted member of its pair.
    pub fn inverted(&self) -> bool {
        self.inverted
    }

    /// Identity of the inverse metaedge.
    pub fn inverse_id(&self) -> MetaEdgeId {
        self.id.inverse()
    }

    /// Relation code with direction marker: `r>`, `<r` or `r`.
    pub fn kind_abbrev(&self) -> &str {
        &self.kind_abbrev
    }

    /// Full code: source code, relation code, target code (e.g. `Gr>G`).
    pub fn abbrev(&self) -> &str {
        &self.abbrev
    }

    /// Code of the non-inverted member of the pair with `<>` removed.
    pub fn standard_abbrev(&self) -> &str {
        &self.standard_abbrev
    }

    /// Filename-safe rendering: `{src}{kind}{tgt}-{direction}`.
    pub fn filesystem_str(&self) -> String {
        let s = format!("{}-{}", self.abbrev, self.id.direction);
        s.replace(['<', '>'], "")
    }

    /// Unicode rendering: `source→kind→target`.
    pub fn unicode_str(&self) -> String {
        self.id.unicode_str()
    }

    pub(crate) fn set_abbrevs(&mut self, kind_abbrev: String, abbrev: String, standard_abbrev: String) {
        self.kind_abbrev = kind_abbrev;
        self.abbrev = abbrev;
        self.standard_abbrev = standard_abbrev;
    }
}

impl Element for MetaEdge {
    type Id = MetaEdgeId;
    const CLASS: ElementClass = ElementClass::MetaEdge;

    fn id(&self) -> &MetaEdgeId {
        &self.id
    }
}

impl EdgeElement for MetaEdge {
    fn is_inverted(&self) -> bool {
        self.inverted
    }
}

impl std::fmt::Display for MetaEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.id, f)
    }
}

/// Relation code with its direction marker.
pub(crate) fn directed_kind_abbrev(code: &str, direction: Direction) -> String {
    match direction {
        Direction::Forward => format!("{code}>"),
        Direction::Backward => format!("<{code}"),
        Direction::Both => code.to_string(),
    }
}
