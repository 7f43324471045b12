//! Metapaths and their enumeration.
//!
//! ## Memoization
//!
//! Every metapath is created through [`MetaGraph::get_metapath`], which keeps
//! one shared object per edge sequence. Creating a metapath also creates its
//! inverse and resolves its `sub` (the path without its first edge) through
//! the same cache, so downstream computations that recurse on `sub` or work
//! in the reverse direction always reuse the same objects.
//!
//! ## Enumeration
//!
//! ```text
//! depth 1:  one metapath per metaedge leaving the source kind
//! depth n:  every depth n-1 metapath extended by every metaedge
//!           leaving its target kind
//! result:   all depths 1..=max_length, filtered to the target kind
//! ```
//!
//! Walks may revisit a kind; the length bound is the only limit.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::error::{ElementClass, HetnetError, Result};
use crate::types::{Kind, MetaEdgeId, Path};
use super::MetaGraph;

/// A type-level walk through the metagraph.
///
/// Only obtainable from a [`MetaGraph`], which guarantees that equal edge
/// sequences share one `Arc<MetaPath>`.
#[derive(Debug)]
pub struct MetaPath {
    path: Path<Kind>,
    /// Suffix without the first edge, `None` for single-edge paths.
    sub: Option<Arc<MetaPath>>,
    abbrev: String,
}

impl MetaPath {
    /// The underlying edge sequence.
    pub fn path(&self) -> &Path<Kind> {
        &self.path
    }

    /// This metapath without its first edge.
    pub fn sub(&self) -> Option<&Arc<MetaPath>> {
        self.sub.as_ref()
    }

    /// Compact rendering such as `CtDaG`.
    pub fn abbrev(&self) -> &str {
        &self.abbrev
    }

    /// Unicode rendering such as `compound–treats–disease`.
    pub fn unicode_str(&self) -> String {
        self.path.unicode_str_with(Kind::to_string)
    }

    /// First candidate that is a prefix of this metapath, in candidate order.
    pub fn max_overlap<'a>(
        &self,
        candidates: impl IntoIterator<Item = &'a Arc<MetaPath>>,
    ) -> Option<&'a Arc<MetaPath>> {
        candidates
            .into_iter()
            .find(|candidate| self.path.has_prefix(&candidate.path))
    }
}

impl Deref for MetaPath {
    type Target = Path<Kind>;

    fn deref(&self) -> &Path<Kind> {
        &self.path
    }
}

impl AsRef<Path<Kind>> for MetaPath {
    fn as_ref(&self) -> &Path<Kind> {
        &self.path
    }
}

impl PartialEq for MetaPath {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for MetaPath {}

impl Hash for MetaPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl fmt::Display for MetaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.abbrev)
    }
}

impl MetaGraph {
    /// Get the unique metapath for an edge sequence, creating it and its
    /// inverse on first request.
    ///
    /// Returns `Ok(None)` for the empty sequence, which is never cached.
    ///
    /// # Errors
    /// - `LookupError` if an edge is not declared
    /// - `InvariantViolation` if the sequence is not contiguous
    pub fn get_metapath(&self, edges: &[MetaEdgeId]) -> Result<Option<Arc<MetaPath>>> {
        if edges.is_empty() {
            return Ok(None);
        }
        if let Some(metapath) = self.paths.read().get(edges) {
            return Ok(Some(Arc::clone(metapath)));
        }

        let path = Path::new(edges.to_vec())?;
        let inverse_path = Path::new(path.inverse_edges())?;
        let abbrev = self.path_abbrev(&path)?;
        let inverse_abbrev = self.path_abbrev(&inverse_path)?;

        // Resolve suffixes before taking the write lock; recursion re-enters
        let sub = self.get_metapath(&path.edges()[1..])?;
        let inverse_sub = self.get_metapath(&inverse_path.edges()[1..])?;

        tracing::trace!(metapath = %abbrev, inverse = %inverse_abbrev, "Caching metapath");

        let metapath = Arc::new(MetaPath { path, sub, abbrev });
        let inverse = Arc::new(MetaPath {
            path: inverse_path,
            sub: inverse_sub,
            abbrev: inverse_abbrev,
        });

        let mut paths = self.paths.write();
        let metapath = Arc::clone(
            paths
                .entry(metapath.path.edges().to_vec())
                .or_insert(metapath),
        );
        // Palindromic sequences are their own inverse: keep the first entry
        paths
            .entry(inverse.path.edges().to_vec())
            .or_insert(inverse);
        Ok(Some(metapath))
    }

    /// Cached inverse of a metapath.
    pub fn inverse_of(&self, metapath: &MetaPath) -> Result<Arc<MetaPath>> {
        self.get_metapath(&metapath.inverse_edges())?
            .ok_or_else(|| HetnetError::invariant("metapath has no edges"))
    }

    /// Enumerate every metapath from `source_kind` to `target_kind` with
    /// 1 to `max_length` edges, shortest first.
    ///
    /// # Errors
    /// `LookupError` if either kind is not declared.
    pub fn extract_metapaths(
        &self,
        source_kind: &Kind,
        target_kind: &Kind,
        max_length: usize,
    ) -> Result<Vec<Arc<MetaPath>>> {
        let source = self.get_node(source_kind)?;
        self.get_node(target_kind)?;

        if max_length == 0 {
            return Ok(Vec::new());
        }

        let mut frontier = Vec::with_capacity(source.edges().len());
        for edge in source.edges() {
            if let Some(metapath) = self.get_metapath(std::slice::from_ref(edge))? {
                frontier.push(metapath);
            }
        }
        let mut metapaths = frontier.clone();

        for depth in 2..=max_length {
            let mut next = Vec::new();
            for metapath in &frontier {
                for edge in self.get_node(metapath.target())?.edges() {
                    let mut edges = metapath.edges().to_vec();
                    edges.push(edge.clone());
                    if let Some(extended) = self.get_metapath(&edges)? {
                        next.push(extended);
                    }
                }
            }
            tracing::debug!(
                source = %source_kind,
                depth,
                frontier = next.len(),
                "Extended metapath frontier"
            );
            metapaths.extend(next.iter().cloned());
            frontier = next;
        }

        metapaths.retain(|metapath| metapath.target() == target_kind);
        tracing::debug!(
            source = %source_kind,
            target = %target_kind,
            max_length,
            found = metapaths.len(),
            "Extracted metapaths"
        );
        Ok(metapaths)
    }

    /// Parse a metapath abbreviation such as `CtDaG`.
    ///
    /// # Errors
    /// `LookupError` if the text is malformed or any token does not resolve
    /// to a declared metaedge.
    pub fn metapath_from_abbrev(&self, text: &str) -> Result<Arc<MetaPath>> {
        let mut edges = Vec::new();
        for token in self.scheme.split_metapath(text)? {
            let edge_id = self.scheme.resolve_metaedge(self, &token)?;
            edges.push(self.get_edge(&edge_id)?.id().clone());
        }
        self.get_metapath(&edges)?
            .ok_or_else(|| HetnetError::lookup(ElementClass::Abbreviation, text))
    }

    /// Number of cached metapaths.
    pub fn metapath_count(&self) -> usize {
        self.paths.read().len()
    }

    fn path_abbrev(&self, path: &Path<Kind>) -> Result<String> {
        let mut abbrev = String::new();
        for edge_id in path {
            let edge = self.get_edge(edge_id)?;
            abbrev.push_str(self.get_node(edge.source())?.abbrev());
            abbrev.push_str(edge.kind_abbrev());
        }
        abbrev.push_str(self.get_node(path.target())?.abbrev());
        Ok(abbrev)
    }
}
