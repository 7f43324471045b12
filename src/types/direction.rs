//! Edge direction for metaedges and edges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a relation between two kinds.
///
/// `Both` marks an undirected relation. Ordering follows declaration order
/// and only exists so identities can live in ordered maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Source points at target.
    Forward,
    /// Target points at source.
    Backward,
    /// Undirected.
    Both,
}

impl Direction {
    /// Parse direction from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "forward" => Some(Self::Forward),
            "backward" => Some(Self::Backward),
            "both" => Some(Self::Both),
            _ => None,
        }
    }

    /// Direction of the inverse relation.
    pub fn inverse(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
            Self::Both => Self::Both,
        }
    }

    /// Separator symbol used in plain-text rendering.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Forward => ">",
            Self::Backward => "<",
            Self::Both => "-",
        }
    }

    /// Arrow glyph used in unicode rendering.
    pub fn unicode_symbol(self) -> &'static str {
        match self {
            Self::Forward => "→",
            Self::Backward => "←",
            Self::Both => "–",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Backward => write!(f, "backward"),
            Self::Both => write!(f, "both"),
        }
    }
}
