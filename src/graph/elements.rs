//! Instance nodes and edges.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::error::ElementClass;
use crate::store::{EdgeElement, Element};
use crate::types::{EdgeId, Identifier, Kind, Mask, Maskable, MetaEdgeId, NodeId};

/// An entity of a declared kind.
///
/// Holds one incident-edge set per metaedge leaving its kind, so typed
/// neighbour lookups never scan unrelated edges.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    data: Option<Arc<Value>>,
    mask: Mask,
    edges: BTreeMap<MetaEdgeId, BTreeSet<EdgeId>>,
}

impl Node {
    pub(crate) fn new<'a>(
        id: NodeId,
        name: Option<&str>,
        data: Option<Value>,
        metaedges: impl IntoIterator<Item = &'a MetaEdgeId>,
    ) -> Self {
        let name = name.map_or_else(|| id.identifier.to_string(), str::to_string);
        Self {
            id,
            name,
            data: data.map(Arc::new),
            mask: Mask::default(),
            edges: metaedges
                .into_iter()
                .map(|m| (m.clone(), BTreeSet::new()))
                .collect(),
        }
    }

    /// Node identity.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Node kind.
    pub fn kind(&self) -> &Kind {
        &self.id.kind
    }

    /// Identifier within the kind.
    pub fn identifier(&self) -> &Identifier {
        &self.id.identifier
    }

    /// Display name (the identifier unless one was given).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached payload, if any.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_deref()
    }

    /// Incident edges of one metaedge, masked ones included.
    ///
    /// `None` if the metaedge does not leave this node's kind.
    pub fn edge_ids(&self, metaedge: &MetaEdgeId) -> Option<&BTreeSet<EdgeId>> {
        self.edges.get(metaedge)
    }

    /// Number of incident edges across all metaedges.
    pub fn degree(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    pub(crate) fn link(&mut self, metaedge: &MetaEdgeId, edge: EdgeId) {
        self.edges.entry(metaedge.clone()).or_default().insert(edge);
    }
}

impl Element for Node {
    type Id = NodeId;
    const CLASS: ElementClass = ElementClass::Node;

    fn id(&self) -> &NodeId {
        &self.id
    }
}

impl Maskable for Node {
    fn mask_flag(&self) -> &Mask {
        &self.mask
    }

    fn mask_flag_mut(&mut self) -> &mut Mask {
        &mut self.mask
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

/// An instantiated metaedge between two nodes.
///
/// Always created together with its inverse; both share one payload.
#[derive(Debug, Clone)]
pub struct Edge {
    id: EdgeId,
    metaedge: MetaEdgeId,
    inverted: bool,
    data: Option<Arc<Value>>,
    mask: Mask,
}

impl Edge {
    pub(crate) fn new(
        id: EdgeId,
        metaedge: MetaEdgeId,
        inverted: bool,
        data: Option<Arc<Value>>,
    ) -> Self {
        Self {
            id,
            metaedge,
            inverted,
            data,
            mask: Mask::default(),
        }
    }

    /// Edge identity.
    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    /// Source node identity.
    pub fn source(&self) -> &NodeId {
        &self.id.source
    }

    /// Target node identity.
    pub fn target(&self) -> &NodeId {
        &self.id.target
    }

    /// The metaedge this edge instantiates.
    pub fn metaedge(&self) -> &MetaEdgeId {
        &self.metaedge
    }

    /// Whether this is the inverted member of its pair.
    pub fn inverted(&self) -> bool {
        self.inverted
    }

    /// Identity of the inverse edge.
    pub fn inverse_id(&self) -> EdgeId {
        self.id.inverse()
    }

    /// Attached payload, if any.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_deref()
    }
}

impl Element for Edge {
    type Id = EdgeId;
    const CLASS: ElementClass = ElementClass::Edge;

    fn id(&self) -> &EdgeId {
        &self.id
    }
}

impl EdgeElement for Edge {
    fn is_inverted(&self) -> bool {
        self.inverted
    }
}

impl Maskable for Edge {
    fn mask_flag(&self) -> &Mask {
        &self.mask
    }

    fn mask_flag_mut(&mut self) -> &mut Mask {
        &mut self.mask
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}
