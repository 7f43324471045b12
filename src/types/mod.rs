//! Core types shared by the metagraph and the instance graph.

pub mod direction;
pub mod kind;
pub mod edge;
pub mod mask;
pub mod path;

pub use direction::Direction;
pub use kind::{Kind, Identifier, NodeId};
pub use edge::{EdgeTuple, MetaEdgeId, EdgeId, NodeKey};
pub use mask::{Mask, Maskable, MaskIndex, MaskElement};
pub use path::Path;
