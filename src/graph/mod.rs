//! The instance graph: concrete nodes and edges typed by a metagraph.
//!
//! Every node belongs to a declared kind and every edge instantiates a
//! declared metaedge. Edges are always added in pairs with their inverse,
//! mirroring the metaedge/inverse pairs of the metagraph:
//!
//! ```text
//! add_edge(compound::DB01, disease::DOID:2377, treats, forward)
//!     compound::DB01 > treats > disease::DOID:2377    (source adjacency)
//!     disease::DOID:2377 < treats < compound::DB01    (target adjacency)
//! ```
//!
//! Nodes and edges are never removed. Masking stands in for removal.

pub mod elements;

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{ElementClass, HetnetError, Result};
use crate::metagraph::{MetaGraph, MetaPath};
use crate::store::InMemoryGraphStore;
use crate::types::{
    Direction, EdgeId, Identifier, Kind, MaskIndex, Maskable, MetaEdgeId, NodeId, Path,
};

pub use elements::{Edge, Node};

/// A graph of entities instantiated against a fixed metagraph.
#[derive(Debug)]
pub struct Graph {
    metagraph: Arc<MetaGraph>,
    store: InMemoryGraphStore<Node, Edge>,
    data: Option<Value>,
}

impl Graph {
    /// Create an empty graph over a metagraph.
    pub fn new(metagraph: Arc<MetaGraph>) -> Self {
        Self {
            metagraph,
            store: InMemoryGraphStore::new(),
            data: None,
        }
    }

    /// Create an empty graph with a graph-level payload.
    pub fn with_data(metagraph: Arc<MetaGraph>, data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::new(metagraph)
        }
    }

    /// The metagraph this graph is typed by.
    pub fn metagraph(&self) -> &Arc<MetaGraph> {
        &self.metagraph
    }

    /// Graph-level payload, if any.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Add a node of a declared kind.
    ///
    /// `name` defaults to the identifier.
    ///
    /// # Errors
    /// - `LookupError` if `kind` is not declared
    /// - `InvariantViolation` if `(kind, identifier)` already exists
    pub fn add_node(
        &mut self,
        kind: impl Into<Kind>,
        identifier: impl Into<Identifier>,
        name: Option<&str>,
        data: Option<Value>,
    ) -> Result<&Node> {
        let id = NodeId::new(kind, identifier);
        let metanode = self.metagraph.get_node(&id.kind)?;
        let node = Node::new(id.clone(), name, data, metanode.edges());
        self.store.insert_node(node)?;
        self.store.get_node(&id)
    }

    /// Add an edge and its inverse.
    ///
    /// The edge is registered in the source's adjacency under its metaedge
    /// and the inverse in the target's adjacency under the inverse metaedge.
    /// Returns `(edge, inverse)`; an undirected self-loop on one node is its
    /// own inverse and is returned twice.
    ///
    /// # Errors
    /// - `LookupError` if either endpoint or the metaedge is unknown
    /// - `InvariantViolation` if the edge or its inverse already exists
    pub fn add_edge(
        &mut self,
        source: &NodeId,
        target: &NodeId,
        kind: impl Into<Kind>,
        direction: Direction,
        data: Option<Value>,
    ) -> Result<(EdgeId, EdgeId)> {
        self.store.get_node(source)?;
        self.store.get_node(target)?;
        let kind = kind.into();
        let metaedge_id = MetaEdgeId::new(
            source.kind.clone(),
            target.kind.clone(),
            kind.clone(),
            direction,
        );
        let metaedge = self.metagraph.get_edge(&metaedge_id)?;
        let inverted = metaedge.inverted();
        let inverse_metaedge_id = metaedge.inverse_id();

        let edge_id = EdgeId::new(source.clone(), target.clone(), kind, direction);
        let inverse_id = edge_id.inverse();
        let self_inverse = edge_id == inverse_id;
        for id in [&edge_id, &inverse_id] {
            if self.store.contains_edge(id) {
                return Err(HetnetError::invariant(format!("duplicate edge: {id}")));
            }
        }

        let data = data.map(Arc::new);
        self.store.insert_edge(Edge::new(
            edge_id.clone(),
            metaedge_id.clone(),
            inverted,
            data.clone(),
        ))?;
        self.store.get_node_mut(source)?.link(&metaedge_id, edge_id.clone());

        if !self_inverse {
            self.store.insert_edge(Edge::new(
                inverse_id.clone(),
                inverse_metaedge_id.clone(),
                !inverted,
                data,
            ))?;
            self.store
                .get_node_mut(target)?
                .link(&inverse_metaedge_id, inverse_id.clone());
        }

        tracing::trace!(
            edge = %edge_id,
            source_degree = self.store.get_node(source).map_or(0, Node::degree),
            target_degree = self.store.get_node(target).map_or(0, Node::degree),
            "Added edge pair"
        );
        Ok((edge_id, inverse_id))
    }

    /// Get a node by identity.
    pub fn get_node(&self, id: &NodeId) -> Result<&Node> {
        self.store.get_node(id)
    }

    /// Get a node by identity, mutably (for masking).
    pub fn get_node_mut(&mut self, id: &NodeId) -> Result<&mut Node> {
        self.store.get_node_mut(id)
    }

    /// Get an edge by identity.
    pub fn get_edge(&self, id: &EdgeId) -> Result<&Edge> {
        self.store.get_edge(id)
    }

    /// Get an edge by identity, mutably (for masking).
    pub fn get_edge_mut(&mut self, id: &EdgeId) -> Result<&mut Edge> {
        self.store.get_edge_mut(id)
    }

    /// Get the inverse of an edge.
    pub fn get_inverse(&self, edge: &Edge) -> Result<&Edge> {
        self.store.get_edge(&edge.inverse_id())
    }

    /// Iterate over nodes in identity order.
    pub fn get_nodes(&self) -> impl Iterator<Item = &Node> {
        self.store.nodes()
    }

    /// Iterate over edges, optionally skipping inverted ones.
    pub fn get_edges(&self, exclude_inverts: bool) -> impl Iterator<Item = &Edge> {
        self.store.edges(exclude_inverts)
    }

    /// Whether a node with this identity exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.store.contains_node(id)
    }

    /// Get number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.store.num_nodes()
    }

    /// Get number of edges, inverses included.
    pub fn num_edges(&self) -> usize {
        self.store.num_edges()
    }

    /// Edges of one metaedge incident to a node.
    ///
    /// With `exclude_masked`, edges that are masked or whose target node is
    /// masked are left out.
    ///
    /// # Errors
    /// `LookupError` if the node is unknown or the metaedge does not leave
    /// the node's kind.
    pub fn get_node_edges(
        &self,
        node: &NodeId,
        metaedge: &MetaEdgeId,
        exclude_masked: bool,
    ) -> Result<Vec<&Edge>> {
        let edge_ids = self
            .store
            .get_node(node)?
            .edge_ids(metaedge)
            .ok_or_else(|| HetnetError::lookup(ElementClass::MetaEdge, metaedge))?;

        let mut edges = Vec::with_capacity(edge_ids.len());
        for edge_id in edge_ids {
            let edge = self.store.get_edge(edge_id)?;
            if exclude_masked
                && (edge.is_masked() || self.store.get_node(edge.target())?.is_masked())
            {
                continue;
            }
            edges.push(edge);
        }
        Ok(edges)
    }

    /// Mask a node.
    pub fn mask_node(&mut self, id: &NodeId) -> Result<()> {
        self.store.get_node_mut(id)?.mask();
        Ok(())
    }

    /// Unmask a node.
    pub fn unmask_node(&mut self, id: &NodeId) -> Result<()> {
        self.store.get_node_mut(id)?.unmask();
        Ok(())
    }

    /// Mask an edge. Its inverse is left untouched.
    pub fn mask_edge(&mut self, id: &EdgeId) -> Result<()> {
        self.store.get_edge_mut(id)?.mask();
        Ok(())
    }

    /// Unmask an edge.
    pub fn unmask_edge(&mut self, id: &EdgeId) -> Result<()> {
        self.store.get_edge_mut(id)?.unmask();
        Ok(())
    }

    /// Clear every node and edge mask.
    pub fn unmask_all(&mut self) {
        self.store.nodes_mut().for_each(Maskable::unmask);
        self.store.edges_mut().for_each(Maskable::unmask);
        tracing::debug!(
            nodes = self.store.num_nodes(),
            edges = self.store.num_edges(),
            "Unmasked graph"
        );
    }

    /// Build a path from existing edges.
    ///
    /// # Errors
    /// - `LookupError` if an edge does not exist
    /// - `InvariantViolation` if the sequence is empty or not contiguous
    pub fn get_path(&self, edges: Vec<EdgeId>) -> Result<Path<NodeId>> {
        for edge_id in &edges {
            self.store.get_edge(edge_id)?;
        }
        Path::new(edges)
    }

    /// Whether any edge or node along a path is masked.
    pub fn is_path_masked(&self, path: &Path<NodeId>) -> Result<bool> {
        path.is_masked(self)
    }

    /// The metapath a path instantiates.
    pub fn metapath_of(&self, path: &Path<NodeId>) -> Result<Arc<MetaPath>> {
        let mut metaedges = Vec::with_capacity(path.len());
        for edge_id in path {
            metaedges.push(self.store.get_edge(edge_id)?.metaedge().clone());
        }
        self.metagraph
            .get_metapath(&metaedges)?
            .ok_or_else(|| HetnetError::invariant("path has no edges"))
    }

    /// Unicode rendering of a path using node display names.
    pub fn path_unicode_str(&self, path: &Path<NodeId>) -> String {
        path.unicode_str_with(|id| match self.store.get_node(id) {
            Ok(node) => node.name().to_string(),
            Err(_) => id.to_string(),
        })
    }

    /// Nodes grouped by kind.
    pub fn get_metanode_to_nodes(&self) -> BTreeMap<&Kind, Vec<&Node>> {
        let mut metanode_to_nodes: BTreeMap<&Kind, Vec<&Node>> = BTreeMap::new();
        for node in self.store.nodes() {
            metanode_to_nodes.entry(node.kind()).or_default().push(node);
        }
        metanode_to_nodes
    }

    /// Edges grouped by metaedge; every metaedge gets an entry.
    pub fn get_metaedge_to_edges(&self, exclude_inverts: bool) -> BTreeMap<&MetaEdgeId, Vec<&Edge>> {
        let mut metaedge_to_edges: BTreeMap<&MetaEdgeId, Vec<&Edge>> = self
            .metagraph
            .get_edges(exclude_inverts)
            .map(|m| (m.id(), Vec::new()))
            .collect();
        for edge in self.store.edges(exclude_inverts) {
            metaedge_to_edges.entry(edge.metaedge()).or_default().push(edge);
        }
        metaedge_to_edges
    }
}

impl MaskIndex<NodeId> for Graph {
    fn is_node_masked(&self, id: &NodeId) -> Result<bool> {
        Ok(self.store.get_node(id)?.is_masked())
    }

    fn is_edge_masked(&self, id: &EdgeId) -> Result<bool> {
        Ok(self.store.get_edge(id)?.is_masked())
    }
}
