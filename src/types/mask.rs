//! Soft exclusion flags for nodes and edges.
//!
//! Masking lets callers simulate the removal of a node or edge (for example
//! in leave-one-out evaluation) without touching graph topology. A flag is
//! purely local: masking a node does not mask its edges, and neighbours are
//! never updated.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use super::edge::EdgeTuple;

/// A single exclusion flag. Unmasked by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mask {
    masked: bool,
}

impl Mask {
    /// Set the flag.
    pub fn mask(&mut self) {
        self.masked = true;
    }

    /// Clear the flag.
    pub fn unmask(&mut self) {
        self.masked = false;
    }

    /// Read the flag.
    pub fn is_masked(&self) -> bool {
        self.masked
    }
}

/// An element that owns a [`Mask`].
pub trait Maskable {
    /// Borrow the element's flag.
    fn mask_flag(&self) -> &Mask;

    /// Mutably borrow the element's flag.
    fn mask_flag_mut(&mut self) -> &mut Mask;

    /// Mask this element.
    fn mask(&mut self) {
        self.mask_flag_mut().mask();
    }

    /// Unmask this element.
    fn unmask(&mut self) {
        self.mask_flag_mut().unmask();
    }

    /// Whether this element is masked.
    fn is_masked(&self) -> bool {
        self.mask_flag().is_masked()
    }
}

/// Mask state lookup by identity, used to evaluate sequences of elements.
pub trait MaskIndex<N> {
    /// Whether the node with this identity is masked.
    fn is_node_masked(&self, id: &N) -> Result<bool>;

    /// Whether the edge with this identity is masked.
    fn is_edge_masked(&self, id: &EdgeTuple<N>) -> Result<bool>;
}

/// One maskable element visited along a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskElement<'a, N> {
    /// An edge of the path.
    Edge(&'a EdgeTuple<N>),
    /// A node of the path.
    Node(&'a N),
}
