//! Declarative metagraph configuration.
//!
//! A metagraph is declared by its relations, each a 4-tuple
//! `[source, target, kind, direction]`, plus optional abbreviations:
//!
//! ```json
//! {
//!   "metaedges": [
//!     ["compound", "disease", "treats", "both"],
//!     ["gene", "gene", "regulates", "forward"]
//!   ],
//!   "kind_to_abbrev": {"compound": "C", "disease": "D", "gene": "G",
//!                      "treats": "t", "regulates": "r"}
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::abbreviation::KindAbbreviations;
use crate::error::Result;
use crate::types::{Direction, Kind, MetaEdgeId};

/// One relation declaration: `(source, target, kind, direction)`.
pub type MetaEdgeTuple = (Kind, Kind, Kind, Direction);

/// Relation declarations for building a [`MetaGraph`](crate::MetaGraph).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaGraphConfig {
    /// Declared relations, in declaration order.
    pub metaedges: Vec<MetaEdgeTuple>,
    /// Abbreviations to use instead of generated ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind_to_abbrev: Option<KindAbbreviations>,
}

impl MetaGraphConfig {
    /// Create a configuration from relation declarations.
    pub fn new(metaedges: Vec<MetaEdgeTuple>) -> Self {
        Self {
            metaedges,
            kind_to_abbrev: None,
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the configuration as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Declared relations as metaedge identities.
    pub fn metaedge_ids(&self) -> Vec<MetaEdgeId> {
        self.metaedges
            .iter()
            .map(|(source, target, kind, direction)| {
                MetaEdgeId::new(source.clone(), target.clone(), kind.clone(), *direction)
            })
            .collect()
    }
}
