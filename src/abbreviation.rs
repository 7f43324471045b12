//! Kind abbreviations for compact metapath rendering and parsing.
//!
//! Metanode kinds get uppercase codes and relation kinds lowercase codes, so
//! a metapath abbreviation alternates between the two:
//!
//! ```text
//! CtDaG  =  C t D  +  D a G
//!           compound-target-disease, disease-association-gene
//! ```
//!
//! Directed relations carry a marker: `Gr>G` (forward) and `G<rG` (backward).

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::sync::OnceLock;

use regex_lite::Regex;

use crate::error::{ElementClass, HetnetError, Result};
use crate::metagraph::MetaGraph;
use crate::types::{Direction, Kind, MetaEdgeId};

/// Mapping from every metanode and relation kind to its short code.
pub type KindAbbreviations = BTreeMap<Kind, String>;

/// The abbreviation operations a metagraph depends on.
pub trait AbbreviationScheme: fmt::Debug + Send + Sync {
    /// Generate codes for every kind in the metagraph.
    fn assign(&self, metagraph: &MetaGraph) -> KindAbbreviations;

    /// Check that the metagraph's codes are complete, unique and parseable.
    fn validate(&self, metagraph: &MetaGraph) -> bool;

    /// Split a metapath abbreviation into per-metaedge abbreviations.
    fn split_metapath(&self, text: &str) -> Result<Vec<String>>;

    /// Resolve a metaedge abbreviation to a metaedge identity.
    ///
    /// The identity is not checked for existence.
    fn resolve_metaedge(&self, metagraph: &MetaGraph, abbrev: &str) -> Result<MetaEdgeId>;
}

/// Default scheme: initials first, then longer prefixes until unique.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAbbreviations;

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Z]+|[a-z<>]+").expect("static pattern"))
}

fn metaedge_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Z]+)(<?)([a-z]+)(>?)([A-Z]+)$").expect("static pattern")
    })
}

fn is_upper_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| c.is_ascii_uppercase())
}

fn is_lower_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| c.is_ascii_lowercase())
}

/// Candidate codes for a kind, in preference order (lowercase).
fn candidates(kind: &str) -> Vec<String> {
    let initials: String = kind
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter_map(|word| word.chars().next())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let letters: Vec<char> = kind
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let mut out = Vec::new();
    if !initials.is_empty() {
        out.push(initials.clone());
    }
    for n in 1..=letters.len() {
        let prefix: String = letters[..n].iter().collect();
        if prefix != initials {
            out.push(prefix);
        }
    }
    out
}

/// Assign the first unused candidate to each kind, in kind order.
fn find_abbrevs<'a>(kinds: impl IntoIterator<Item = &'a Kind>, upper: bool) -> KindAbbreviations {
    let mut used = HashSet::new();
    let mut abbrevs = KindAbbreviations::new();
    for kind in kinds {
        for candidate in candidates(kind.as_str()) {
            let code = if upper {
                candidate.to_ascii_uppercase()
            } else {
                candidate
            };
            if used.insert(code.clone()) {
                abbrevs.insert(kind.clone(), code);
                break;
            }
        }
    }
    abbrevs
}

/// Check codes are present, well-formed and unique within one class.
fn check_codes<'a>(
    kinds: impl IntoIterator<Item = &'a Kind>,
    kind_to_abbrev: &KindAbbreviations,
    well_formed: fn(&str) -> bool,
    class: &str,
) -> bool {
    let mut valid = true;
    let mut seen: BTreeMap<&str, &Kind> = BTreeMap::new();
    for kind in kinds {
        let Some(code) = kind_to_abbrev.get(kind) else {
            tracing::warn!(%kind, class, "Missing abbreviation");
            valid = false;
            continue;
        };
        if !well_formed(code) {
            tracing::warn!(%kind, code = %code, class, "Malformed abbreviation");
            valid = false;
        }
        if let Some(previous) = seen.insert(code.as_str(), kind) {
            tracing::warn!(%kind, %previous, code = %code, class, "Duplicate abbreviation");
            valid = false;
        }
    }
    valid
}

impl StandardAbbreviations {
    /// Create the default scheme.
    pub fn new() -> Self {
        Self
    }
}

impl AbbreviationScheme for StandardAbbreviations {
    fn assign(&self, metagraph: &MetaGraph) -> KindAbbreviations {
        let mut abbrevs = find_abbrevs(metagraph.get_nodes().map(|n| n.kind()), true);
        // A name used for both a metanode and a relation keeps the relation
        // code, which then fails validation.
        abbrevs.extend(find_abbrevs(metagraph.edge_kinds(), false));
        abbrevs
    }

    fn validate(&self, metagraph: &MetaGraph) -> bool {
        let kind_to_abbrev = metagraph.kind_to_abbrev();
        let nodes_valid = check_codes(
            metagraph.get_nodes().map(|n| n.kind()),
            kind_to_abbrev,
            is_upper_code,
            "metanode",
        );
        let edges_valid = check_codes(
            metagraph.edge_kinds(),
            kind_to_abbrev,
            is_lower_code,
            "metaedge",
        );
        nodes_valid && edges_valid
    }

    fn split_metapath(&self, text: &str) -> Result<Vec<String>> {
        let tokens: Vec<&str> = token_regex().find_iter(text).map(|m| m.as_str()).collect();
        let well_formed = tokens.concat() == text
            && tokens.len() >= 3
            && tokens.len() % 2 == 1
            && tokens
                .iter()
                .enumerate()
                .all(|(i, t)| (i % 2 == 0) == is_upper_code(t));
        if !well_formed {
            return Err(HetnetError::lookup(ElementClass::Abbreviation, text));
        }

        Ok(tokens
            .windows(3)
            .step_by(2)
            .map(|w| w.concat())
            .collect())
    }

    fn resolve_metaedge(&self, metagraph: &MetaGraph, abbrev: &str) -> Result<MetaEdgeId> {
        let not_found = || HetnetError::lookup(ElementClass::Abbreviation, abbrev);
        let caps = metaedge_regex().captures(abbrev).ok_or_else(not_found)?;

        let direction = match (&caps[2], &caps[4]) {
            ("", "") => Direction::Both,
            ("", ">") => Direction::Forward,
            ("<", "") => Direction::Backward,
            _ => return Err(not_found()),
        };

        let node_kinds: BTreeSet<&Kind> = metagraph.get_nodes().map(|n| n.kind()).collect();
        let edge_kinds = metagraph.edge_kinds();
        let kind_to_abbrev = metagraph.kind_to_abbrev();
        let lookup = |kinds: &BTreeSet<&Kind>, code: &str| -> Result<Kind> {
            kinds
                .iter()
                .find(|k| kind_to_abbrev.get(**k).map(String::as_str) == Some(code))
                .map(|k| (*k).clone())
                .ok_or_else(not_found)
        };

        Ok(MetaEdgeId::new(
            lookup(&node_kinds, &caps[1])?,
            lookup(&node_kinds, &caps[5])?,
            lookup(&edge_kinds, &caps[3])?,
            direction,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metagraph() -> MetaGraph {
        MetaGraph::from_edge_tuples(
            vec![
                MetaEdgeId::from_kinds("Compound", "Disease", "treats", Direction::Both),
                MetaEdgeId::from_kinds("Gene", "Gene", "regulates", Direction::Forward),
                MetaEdgeId::from_kinds("Biological Process", "Gene", "participates", Direction::Both),
                MetaEdgeId::from_kinds("Disease", "Gene", "upregulates", Direction::Both),
                MetaEdgeId::from_kinds("Compound", "Gene", "upregulates", Direction::Both),
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_candidates() {
        assert_eq!(candidates("Biological Process")[0], "bp");
        assert_eq!(candidates("gene"), vec!["g", "ge", "gen", "gene"]);
    }

    #[test]
    fn test_assign_resolves_collisions() {
        let kinds: Vec<Kind> = ["gene", "genotype", "geneset"].into_iter().map(Kind::from).collect();
        let abbrevs = find_abbrevs(&kinds, true);
        assert_eq!(abbrevs[&Kind::from("gene")], "G");
        assert_eq!(abbrevs[&Kind::from("genotype")], "GE");
        assert_eq!(abbrevs[&Kind::from("geneset")], "GEN");
    }

    #[test]
    fn test_assigned_codes() {
        let metagraph = metagraph();
        let abbrevs = metagraph.kind_to_abbrev();
        assert_eq!(abbrevs[&Kind::from("Biological Process")], "BP");
        assert_eq!(abbrevs[&Kind::from("Compound")], "C");
        assert_eq!(abbrevs[&Kind::from("participates")], "p");
        assert_eq!(abbrevs[&Kind::from("regulates")], "r");
        assert_eq!(abbrevs[&Kind::from("treats")], "t");
        assert_eq!(abbrevs[&Kind::from("upregulates")], "u");
        assert!(StandardAbbreviations.validate(&metagraph));
    }

    #[test]
    fn test_split_metapath() {
        let scheme = StandardAbbreviations;
        assert_eq!(scheme.split_metapath("CtDuG").unwrap(), vec!["CtD", "DuG"]);
        assert_eq!(scheme.split_metapath("BPpGr>G").unwrap(), vec!["BPpG", "Gr>G"]);
        assert_eq!(scheme.split_metapath("G<rG").unwrap(), vec!["G<rG"]);
        assert!(scheme.split_metapath("C").unwrap_err().is_lookup());
        assert!(scheme.split_metapath("CtD-G").unwrap_err().is_lookup());
        assert!(scheme.split_metapath("tD").unwrap_err().is_lookup());
    }

    #[test]
    fn test_resolve_metaedge() {
        let metagraph = metagraph();
        let scheme = StandardAbbreviations;
        assert_eq!(
            scheme.resolve_metaedge(&metagraph, "Gr>G").unwrap(),
            MetaEdgeId::from_kinds("Gene", "Gene", "regulates", Direction::Forward)
        );
        assert_eq!(
            scheme.resolve_metaedge(&metagraph, "G<rG").unwrap(),
            MetaEdgeId::from_kinds("Gene", "Gene", "regulates", Direction::Backward)
        );
        assert_eq!(
            scheme.resolve_metaedge(&metagraph, "BPpG").unwrap(),
            MetaEdgeId::from_kinds("Biological Process", "Gene", "participates", Direction::Both)
        );
        assert!(scheme.resolve_metaedge(&metagraph, "G<r>G").unwrap_err().is_lookup());
        assert!(scheme.resolve_metaedge(&metagraph, "XrG").unwrap_err().is_lookup());
    }
}
