//! The metagraph: node kinds, metaedges and the metapath cache.
//!
//! A metagraph is built once from a list of relation declarations. Each
//! declaration registers a metaedge together with its inverse, so every
//! relation can be walked in both directions:
//!
//! ```text
//! (compound, disease, treats, forward)
//!     compound > treats > disease     (canonical)
//!     disease < treats < compound     (inverted)
//! ```
//!
//! After construction the only state that grows is the metapath cache,
//! which hands out exactly one shared [`MetaPath`] per edge sequence.

pub mod elements;
pub mod metapath;

use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::abbreviation::{AbbreviationScheme, KindAbbreviations, StandardAbbreviations};
use crate::canonical::canonical_hash_hex;
use crate::config::MetaGraphConfig;
use crate::error::{HetnetError, Result};
use crate::store::InMemoryGraphStore;
use crate::types::{Kind, MetaEdgeId};

pub use elements::{MetaEdge, MetaNode};
pub use metapath::MetaPath;

use elements::directed_kind_abbrev;

/// Schema-level graph of kinds and the relations declared between them.
pub struct MetaGraph {
    store: InMemoryGraphStore<MetaNode, MetaEdge>,
    kind_to_abbrev: KindAbbreviations,
    scheme: Arc<dyn AbbreviationScheme>,
    /// Metapath cache keyed by edge sequence.
    paths: RwLock<HashMap<Vec<MetaEdgeId>, Arc<MetaPath>>>,
}

impl MetaGraph {
    fn empty(scheme: Arc<dyn AbbreviationScheme>) -> Self {
        Self {
            store: InMemoryGraphStore::new(),
            kind_to_abbrev: KindAbbreviations::new(),
            scheme,
            paths: RwLock::new(HashMap::new()),
        }
    }

    /// Build a metagraph from relation declarations using
    /// [`StandardAbbreviations`].
    ///
    /// When `kind_to_abbrev` is `None` the abbreviations are generated.
    pub fn from_edge_tuples(
        metaedge_tuples: impl IntoIterator<Item = MetaEdgeId>,
        kind_to_abbrev: Option<KindAbbreviations>,
    ) -> Result<Self> {
        Self::from_edge_tuples_with(
            metaedge_tuples,
            kind_to_abbrev,
            Arc::new(StandardAbbreviations::new()),
        )
    }

    /// Build a metagraph with a caller-supplied abbreviation scheme.
    ///
    /// # Errors
    /// - `InvariantViolation` for a duplicate declaration or inverse collision
    /// - `ValidationFailure` if the abbreviations are incomplete or rejected
    ///   by the scheme
    pub fn from_edge_tuples_with(
        metaedge_tuples: impl IntoIterator<Item = MetaEdgeId>,
        kind_to_abbrev: Option<KindAbbreviations>,
        scheme: Arc<dyn AbbreviationScheme>,
    ) -> Result<Self> {
        let mut metagraph = Self::empty(scheme);
        for edge_id in metaedge_tuples {
            metagraph.add_node(edge_id.source.clone());
            metagraph.add_node(edge_id.target.clone());
            metagraph.add_edge(edge_id)?;
        }

        let kind_to_abbrev = match kind_to_abbrev {
            Some(map) => map,
            None => metagraph.scheme.assign(&metagraph),
        };
        metagraph.set_abbreviations(kind_to_abbrev)?;

        if !metagraph.scheme.validate(&metagraph) {
            return Err(HetnetError::ValidationFailure(
                "abbreviations are not unique and parseable".to_string(),
            ));
        }

        tracing::info!(
            metanodes = metagraph.store.num_nodes(),
            metaedges = metagraph.store.num_edges(),
            fingerprint = %metagraph.fingerprint(),
            "Metagraph built"
        );
        Ok(metagraph)
    }

    /// Build a metagraph from a declaration document.
    pub fn from_config(config: &MetaGraphConfig) -> Result<Self> {
        Self::from_edge_tuples(config.metaedge_ids(), config.kind_to_abbrev.clone())
    }

    fn add_node(&mut self, kind: Kind) {
        if !self.store.contains_node(&kind) {
            // Cannot collide: presence checked above
            let _ = self.store.insert_node(MetaNode::new(kind));
        }
    }

    /// Register a metaedge and its inverse. Nothing is registered on error.
    fn add_edge(&mut self, edge_id: MetaEdgeId) -> Result<()> {
        if self.store.contains_edge(&edge_id) {
            return Err(HetnetError::invariant(format!(
                "duplicate metaedge: {edge_id}"
            )));
        }
        let self_inverse = edge_id.is_self_inverse();
        let inverse_id = edge_id.inverse();
        if !self_inverse && self.store.contains_edge(&inverse_id) {
            return Err(HetnetError::invariant(format!(
                "metaedge {edge_id} collides with an existing inverse {inverse_id}"
            )));
        }

        self.store.get_node_mut(&edge_id.source)?.add_edge(edge_id.clone());
        self.store.insert_edge(MetaEdge::new(edge_id.clone(), false))?;

        if !self_inverse {
            self.store.get_node_mut(&inverse_id.source)?.add_edge(inverse_id.clone());
            self.store.insert_edge(MetaEdge::new(inverse_id, true))?;
        }
        Ok(())
    }

    /// Attach kind codes to every metanode and metaedge.
    fn set_abbreviations(&mut self, kind_to_abbrev: KindAbbreviations) -> Result<()> {
        let code = |kind: &Kind| -> Result<String> {
            kind_to_abbrev.get(kind).cloned().ok_or_else(|| {
                HetnetError::ValidationFailure(format!("no abbreviation for kind `{kind}`"))
            })
        };

        let mut node_codes = BTreeMap::new();
        for node in self.store.nodes() {
            node_codes.insert(node.kind().clone(), code(node.kind())?);
        }

        let mut edge_codes = BTreeMap::new();
        for edge in self.store.edges(false) {
            let kind_abbrev = directed_kind_abbrev(&code(edge.kind())?, edge.direction());
            let abbrev = format!(
                "{}{}{}",
                node_codes[edge.source()],
                kind_abbrev,
                node_codes[edge.target()]
            );
            edge_codes.insert(edge.id().clone(), (kind_abbrev, abbrev));
        }

        for node in self.store.nodes_mut() {
            if let Some(code) = node_codes.remove(node.kind()) {
                node.set_abbrev(code);
            }
        }
        let mut standard = BTreeMap::new();
        for edge in self.store.edges(false) {
            let canonical = if edge.inverted() {
                edge.inverse_id()
            } else {
                edge.id().clone()
            };
            let (_, canonical_abbrev) = &edge_codes[&canonical];
            standard.insert(edge.id().clone(), canonical_abbrev.replace(['<', '>'], ""));
        }
        for edge in self.store.edges_mut() {
            let id = edge.id().clone();
            if let (Some((kind_abbrev, abbrev)), Some(standard_abbrev)) =
                (edge_codes.remove(&id), standard.remove(&id))
            {
                edge.set_abbrevs(kind_abbrev, abbrev, standard_abbrev);
            }
        }

        self.kind_to_abbrev = kind_to_abbrev;
        Ok(())
    }

    /// Get a metanode by kind.
    pub fn get_node(&self, kind: &Kind) -> Result<&MetaNode> {
        self.store.get_node(kind)
    }

    /// Get a metaedge by identity.
    pub fn get_edge(&self, id: &MetaEdgeId) -> Result<&MetaEdge> {
        self.store.get_edge(id)
    }

    /// Get the inverse of a metaedge.
    pub fn get_inverse(&self, edge: &MetaEdge) -> Result<&MetaEdge> {
        self.store.get_edge(&edge.inverse_id())
    }

    /// Iterate over metanodes in kind order.
    pub fn get_nodes(&self) -> impl Iterator<Item = &MetaNode> {
        self.store.nodes()
    }

    /// Iterate over metaedges, optionally one per declared relation.
    pub fn get_edges(&self, exclude_inverts: bool) -> impl Iterator<Item = &MetaEdge> {
        self.store.edges(exclude_inverts)
    }

    /// Whether a kind is declared.
    pub fn contains(&self, kind: &Kind) -> bool {
        self.store.contains_node(kind)
    }

    /// Distinct relation kinds.
    pub fn edge_kinds(&self) -> BTreeSet<&Kind> {
        self.store.edges(true).map(MetaEdge::kind).collect()
    }

    /// Get number of metanodes.
    pub fn num_nodes(&self) -> usize {
        self.store.num_nodes()
    }

    /// Get number of metaedges, inverses included.
    pub fn num_edges(&self) -> usize {
        self.store.num_edges()
    }

    /// Kind to short-code mapping in use.
    pub fn kind_to_abbrev(&self) -> &KindAbbreviations {
        &self.kind_to_abbrev
    }

    /// The abbreviation scheme used to parse metapath abbreviations.
    pub fn abbreviation_scheme(&self) -> &dyn AbbreviationScheme {
        self.scheme.as_ref()
    }

    /// Canonical hash of the declared relations and their abbreviations.
    pub fn fingerprint(&self) -> String {
        let metaedges: Vec<&MetaEdgeId> = self.store.edges(true).map(|e| e.id()).collect();
        canonical_hash_hex(&(metaedges, &self.kind_to_abbrev))
    }
}

impl fmt::Debug for MetaGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaGraph")
            .field("metanodes", &self.store.num_nodes())
            .field("metaedges", &self.store.num_edges())
            .field("metapaths", &self.paths.read().len())
            .field("scheme", &self.scheme)
            .finish()
    }
}
