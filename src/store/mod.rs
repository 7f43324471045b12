//! Keyed node and edge storage shared by both graph levels.

pub mod memory;

use std::fmt;

use crate::error::ElementClass;

/// An element stored under a stable identity.
pub trait Element {
    /// Identity type used as the storage key.
    type Id: Clone + Ord + fmt::Debug + fmt::Display;

    /// Class reported when a lookup for this element fails.
    const CLASS: ElementClass;

    /// The element's identity.
    fn id(&self) -> &Self::Id;
}

/// An edge element, which is either canonical or the inverted member of an
/// inverse pair.
pub trait EdgeElement: Element {
    /// Whether this is the redundant (inverted) direction of its pair.
    fn is_inverted(&self) -> bool;
}

pub use memory::InMemoryGraphStore;
