//! # hetnet-kernel
//!
//! Heterogeneous networks: graphs whose nodes and edges carry distinct kinds
//! (e.g. "compound", "disease", "treats").
//!
//! The kernel answers one question:
//!
//! > Given two kinds, which type-level walks (metapaths) connect them?
//!
//! ## Core Contract
//!
//! 1. A [`MetaGraph`] declares kinds and the relations between them; every
//!    relation is mirrored by an inverse relation
//! 2. A [`Graph`] instantiates nodes and edges against a fixed metagraph;
//!    every edge is mirrored by an inverse edge
//! 3. Metapaths are enumerated by length and memoized, so equal edge
//!    sequences always share one [`MetaPath`]
//!
//! ## Architecture
//!
//! ```text
//! relation tuples → MetaGraph → extract_metapaths → Arc<MetaPath> (cached)
//!                       ↓
//!                     Graph → typed adjacency → masked neighbour queries
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Nodes, edges and adjacency sets iterate in identity order
//! - Enumeration yields shorter metapaths first, then frontier order
//! - The metagraph fingerprint does not depend on declaration order

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abbreviation;
pub mod canonical;
pub mod config;
pub mod error;
pub mod graph;
pub mod metagraph;
pub mod store;
pub mod types;

// Re-exports
pub use abbreviation::{AbbreviationScheme, KindAbbreviations, StandardAbbreviations};
pub use canonical::{canonical_hash, canonical_hash_hex, to_canonical_bytes};
pub use config::{MetaEdgeTuple, MetaGraphConfig};
pub use error::{ElementClass, HetnetError, Result};
pub use graph::{Edge, Graph, Node};
pub use metagraph::{MetaEdge, MetaGraph, MetaNode, MetaPath};
pub use store::{EdgeElement, Element, InMemoryGraphStore};
pub use types::{
    Direction, EdgeId, EdgeTuple, Identifier, Kind, Mask, MaskElement, MaskIndex, Maskable,
    MetaEdgeId, NodeId, NodeKey, Path,
};
