//! Error types shared by the metagraph and the instance graph.

use std::fmt;

/// Class of element a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementClass {
    /// A metanode kind.
    Kind,
    /// A metaedge identity.
    MetaEdge,
    /// An instance node identity.
    Node,
    /// An instance edge identity.
    Edge,
    /// An abbreviation token.
    Abbreviation,
}

impl fmt::Display for ElementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind => write!(f, "kind"),
            Self::MetaEdge => write!(f, "metaedge"),
            Self::Node => write!(f, "node"),
            Self::Edge => write!(f, "edge"),
            Self::Abbreviation => write!(f, "abbreviation"),
        }
    }
}

/// Error type for hetnet operations.
#[derive(Debug, thiserror::Error)]
pub enum HetnetError {
    /// Referenced an undeclared kind, relation, node or edge.
    #[error("Unknown {element}: {key}")]
    Lookup {
        /// What was being looked up.
        element: ElementClass,
        /// Rendered identity of the missing element.
        key: String,
    },
    /// Duplicate declaration or malformed path.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    /// Abbreviation mapping rejected at metagraph construction.
    #[error("Abbreviation validation failed: {0}")]
    ValidationFailure(String),
    /// Declaration document could not be parsed.
    #[error("Invalid metagraph configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl HetnetError {
    /// Create a lookup error for any displayable key.
    pub fn lookup(element: ElementClass, key: impl fmt::Display) -> Self {
        Self::Lookup {
            element,
            key: key.to_string(),
        }
    }

    /// Create an invariant violation.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }

    /// Check if this is a lookup error.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }

    /// Check if this is an invariant violation.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }

    /// Check if this is a validation failure.
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::ValidationFailure(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HetnetError>;
