//! In-memory element store.

use std::collections::BTreeMap;

use crate::error::{HetnetError, Result};
use super::{EdgeElement, Element};

/// In-memory node and edge storage.
///
/// Uses BTreeMap for deterministic iteration order.
#[derive(Debug, Clone)]
pub struct InMemoryGraphStore<N: Element, E: EdgeElement> {
    /// Nodes by identity.
    nodes: BTreeMap<N::Id, N>,
    /// Edges by identity.
    edges: BTreeMap<E::Id, E>,
}

impl<N: Element, E: EdgeElement> Default for InMemoryGraphStore<N, E> {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
        }
    }
}

impl<N: Element, E: EdgeElement> InMemoryGraphStore<N, E> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Fails if its identity is already stored.
    pub fn insert_node(&mut self, node: N) -> Result<()> {
        if self.nodes.contains_key(node.id()) {
            return Err(HetnetError::invariant(format!(
                "duplicate {}: {}",
                N::CLASS,
                node.id()
            )));
        }
        self.nodes.insert(node.id().clone(), node);
        Ok(())
    }

    /// Add an edge. Fails if its identity is already stored.
    pub fn insert_edge(&mut self, edge: E) -> Result<()> {
        if self.edges.contains_key(edge.id()) {
            return Err(HetnetError::invariant(format!(
                "duplicate {}: {}",
                E::CLASS,
                edge.id()
            )));
        }
        self.edges.insert(edge.id().clone(), edge);
        Ok(())
    }

    /// Get a node by identity.
    pub fn get_node(&self, id: &N::Id) -> Result<&N> {
        self.nodes
            .get(id)
            .ok_or_else(|| HetnetError::lookup(N::CLASS, id))
    }

    /// Get a node by identity, mutably.
    pub fn get_node_mut(&mut self, id: &N::Id) -> Result<&mut N> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| HetnetError::lookup(N::CLASS, id))
    }

    /// Get an edge by identity.
    pub fn get_edge(&self, id: &E::Id) -> Result<&E> {
        self.edges
            .get(id)
            .ok_or_else(|| HetnetError::lookup(E::CLASS, id))
    }

    /// Get an edge by identity, mutably.
    pub fn get_edge_mut(&mut self, id: &E::Id) -> Result<&mut E> {
        self.edges
            .get_mut(id)
            .ok_or_else(|| HetnetError::lookup(E::CLASS, id))
    }

    /// Whether a node with this identity is stored.
    pub fn contains_node(&self, id: &N::Id) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether an edge with this identity is stored.
    pub fn contains_edge(&self, id: &E::Id) -> bool {
        self.edges.contains_key(id)
    }

    /// Iterate over nodes in identity order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.values()
    }

    /// Iterate mutably over nodes.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut N> {
        self.nodes.values_mut()
    }

    /// Iterate over edges in identity order, optionally skipping inverted
    /// edges so each pair is visited once.
    pub fn edges(&self, exclude_inverts: bool) -> impl Iterator<Item = &E> {
        self.edges
            .values()
            .filter(move |e| !(exclude_inverts && e.is_inverted()))
    }

    /// Iterate mutably over all edges.
    pub fn edges_mut(&mut self) -> impl Iterator<Item = &mut E> {
        self.edges.values_mut()
    }

    /// Get number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Get number of edges, inverses included.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ElementClass;

    #[derive(Debug)]
    struct TestNode(String);

    impl Element for TestNode {
        type Id = String;
        const CLASS: ElementClass = ElementClass::Kind;
        fn id(&self) -> &String {
            &self.0
        }
    }

    #[derive(Debug)]
    struct TestEdge(String, bool);

    impl Element for TestEdge {
        type Id = String;
        const CLASS: ElementClass = ElementClass::MetaEdge;
        fn id(&self) -> &String {
            &self.0
        }
    }

    impl EdgeElement for TestEdge {
        fn is_inverted(&self) -> bool {
            self.1
        }
    }

    fn make_store() -> InMemoryGraphStore<TestNode, TestEdge> {
        let mut store = InMemoryGraphStore::new();
        store.insert_node(TestNode("a".into())).unwrap();
        store.insert_node(TestNode("b".into())).unwrap();
        store.insert_edge(TestEdge("a-b".into(), false)).unwrap();
        store.insert_edge(TestEdge("b-a".into(), true)).unwrap();
        store
    }

    #[test]
    fn test_lookup() {
        let store = make_store();
        assert_eq!(store.get_node(&"a".to_string()).unwrap().0, "a");
        assert!(store.contains_node(&"b".to_string()));
        assert!(!store.contains_node(&"c".to_string()));

        let err = store.get_node(&"c".to_string()).unwrap_err();
        assert!(err.is_lookup());
        let err = store.get_edge(&"c-a".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown metaedge: c-a");
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut store = make_store();
        let err = store.insert_node(TestNode("a".into())).unwrap_err();
        assert!(err.is_invariant_violation());
        assert_eq!(store.num_nodes(), 2);
    }

    #[test]
    fn test_edges_exclude_inverts() {
        let store = make_store();
        assert_eq!(store.edges(false).count(), 2);
        let canonical: Vec<_> = store.edges(true).map(|e| e.0.as_str()).collect();
        assert_eq!(canonical, vec!["a-b"]);
        assert_eq!(store.num_edges(), 2);
    }
}
