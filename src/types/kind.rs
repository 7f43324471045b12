//! Identity types for metanodes and nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a node or relation category at schema level.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kind(String);

impl Kind {
    /// Create a new kind.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the kind name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Kind {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Kind {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Kind {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Caller-supplied node identifier, unique within its kind.
///
/// Integers sort before strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    /// Numeric identifier (e.g. Entrez gene IDs).
    Int(i64),
    /// Textual identifier (e.g. `DOID:2377`).
    Str(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// Identity of an instance node: its kind plus its identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId {
    /// Kind of the node.
    pub kind: Kind,
    /// Identifier within the kind.
    pub identifier: Identifier,
}

impl NodeId {
    /// Create a new node identity.
    pub fn new(kind: impl Into<Kind>, identifier: impl Into<Identifier>) -> Self {
        Self {
            kind: kind.into(),
            identifier: identifier.into(),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.kind, self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display() {
        let id = NodeId::new("disease", "DOID:2377");
        assert_eq!(id.to_string(), "disease::DOID:2377");
        assert_eq!(NodeId::new("gene", 5742i64).to_string(), "gene::5742");
    }

    #[test]
    fn test_identifier_ordering() {
        assert!(Identifier::Int(100) < Identifier::from("1"));
        assert!(Identifier::from("a") < Identifier::from("b"));
    }

    #[test]
    fn test_identifier_serde_untagged() {
        let int: Identifier = serde_json::from_str("5742").unwrap();
        let text: Identifier = serde_json::from_str("\"DOID:2377\"").unwrap();
        assert_eq!(int, Identifier::Int(5742));
        assert_eq!(text, Identifier::from("DOID:2377"));
    }
}
