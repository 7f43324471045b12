//! Golden tests for the hetnet kernel.
//!
//! These tests pin down metagraph construction, metapath enumeration and
//! instance graph behaviour on small, hand-checked networks.

use std::sync::Arc;
use hetnet_kernel::{
    Direction, Graph, Kind, MetaEdgeId, MetaGraph, MetaGraphConfig, NodeId,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn metaedge(source: &str, target: &str, kind: &str, direction: Direction) -> MetaEdgeId {
    MetaEdgeId::from_kinds(source, target, kind, direction)
}

fn build_hetio_metagraph() -> MetaGraph {
    MetaGraph::from_edge_tuples(
        vec![
            metaedge("compound", "disease", "indication", Direction::Both),
            metaedge("disease", "gene", "association", Direction::Both),
            metaedge("compound", "gene", "target", Direction::Both),
        ],
        None,
    )
    .unwrap()
}

fn build_hetionet_metagraph() -> MetaGraph {
    //  Anatomy ─e/u─ Gene ─p─ Biological Process
    //     │l          │ i, r>
    //  Disease ──a────┘
    //     │t      Compound ─b─ Gene
    //  Compound ─re─ Compound
    MetaGraph::from_edge_tuples(
        vec![
            metaedge("Anatomy", "Gene", "expresses", Direction::Both),
            metaedge("Anatomy", "Gene", "upregulates", Direction::Both),
            metaedge("Compound", "Gene", "binds", Direction::Both),
            metaedge("Compound", "Disease", "treats", Direction::Both),
            metaedge("Compound", "Compound", "resembles", Direction::Both),
            metaedge("Disease", "Gene", "associates", Direction::Both),
            metaedge("Disease", "Anatomy", "localizes", Direction::Both),
            metaedge("Gene", "Gene", "interacts", Direction::Both),
            metaedge("Gene", "Gene", "regulates", Direction::Forward),
            metaedge("Gene", "Biological Process", "participates", Direction::Both),
        ],
        None,
    )
    .unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// METAGRAPH TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_creation() {
    init_tracing();
    let metagraph = build_hetio_metagraph();

    let kinds: Vec<&str> = metagraph.get_nodes().map(|n| n.kind().as_str()).collect();
    assert_eq!(kinds, vec!["compound", "disease", "gene"]);
    for kind in ["compound", "disease", "gene"] {
        let metanode = metagraph.get_node(&Kind::from(kind)).unwrap();
        assert_eq!(metanode.kind().as_str(), kind);
    }

    let mut g = Graph::new(Arc::new(metagraph));
    let ms = g
        .add_node("disease", "DOID:2377", Some("multiple sclerosis"), None)
        .unwrap();
    assert_eq!(ms.kind().as_str(), "disease");
    assert_eq!(ms.identifier().to_string(), "DOID:2377");
    assert_eq!(ms.name(), "multiple sclerosis");

    // Misordered arguments: "DOID:2377" is not a declared kind
    let err = g
        .add_node("DOID:2377", "multiple sclerosis", Some("disease"), None)
        .unwrap_err();
    assert!(err.is_lookup());
}

#[test]
fn test_every_metaedge_has_inverse() {
    let metagraph = build_hetionet_metagraph();
    // 9 declared pairs + 2 self-inverse loops (resembles, interacts)
    assert_eq!(metagraph.num_edges(), 2 * 8 + 2);
    assert_eq!(metagraph.get_edges(true).count(), 10);

    for edge in metagraph.get_edges(false) {
        let inverse = metagraph.get_inverse(edge).unwrap();
        assert_eq!(metagraph.get_inverse(inverse).unwrap(), edge);
        assert_eq!(inverse.direction(), edge.direction().inverse());
        assert_eq!(inverse.source(), edge.target());
        if inverse.id() != edge.id() {
            assert_ne!(inverse.inverted(), edge.inverted());
        }
        assert_eq!(inverse.standard_abbrev(), edge.standard_abbrev());
    }
}

#[test]
fn test_generated_abbreviations() {
    let metagraph = build_hetionet_metagraph();
    let abbrevs: Vec<(&str, &str)> = metagraph
        .kind_to_abbrev()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(
        abbrevs,
        vec![
            ("Anatomy", "A"),
            ("Biological Process", "BP"),
            ("Compound", "C"),
            ("Disease", "D"),
            ("Gene", "G"),
            ("associates", "a"),
            ("binds", "b"),
            ("expresses", "e"),
            ("interacts", "i"),
            ("localizes", "l"),
            ("participates", "p"),
            ("regulates", "r"),
            ("resembles", "re"),
            ("treats", "t"),
            ("upregulates", "u"),
        ]
    );
}

#[test]
fn test_config_matches_tuples() {
    let config = MetaGraphConfig::from_json(
        r#"{"metaedges": [
            ["compound", "disease", "indication", "both"],
            ["disease", "gene", "association", "both"],
            ["compound", "gene", "target", "both"]
        ]}"#,
    )
    .unwrap();
    let from_config = MetaGraph::from_config(&config).unwrap();
    assert_eq!(from_config.fingerprint(), build_hetio_metagraph().fingerprint());
}

// ─────────────────────────────────────────────────────────────────────────────
// ENUMERATION TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_extract_metapaths_compound_gene() {
    init_tracing();
    let metagraph = build_hetio_metagraph();
    let metapaths = metagraph
        .extract_metapaths(&Kind::from("compound"), &Kind::from("gene"), 2)
        .unwrap();

    assert_eq!(metapaths.len(), 2);
    assert_eq!(metapaths[0].len(), 1);
    assert_eq!(metapaths[0].edges()[0].kind.as_str(), "target");
    assert_eq!(
        metapaths[1].edges(),
        &[
            metaedge("compound", "disease", "indication", Direction::Both),
            metaedge("disease", "gene", "association", Direction::Both),
        ]
    );
}

#[test]
fn test_enumeration_is_deterministic() {
    let metagraph = build_hetionet_metagraph();
    let source = Kind::from("Compound");
    let target = Kind::from("Disease");

    let first: Vec<String> = metagraph
        .extract_metapaths(&source, &target, 3)
        .unwrap()
        .iter()
        .map(|m| m.abbrev().to_string())
        .collect();

    for _ in 0..100 {
        let again: Vec<String> = metagraph
            .extract_metapaths(&source, &target, 3)
            .unwrap()
            .iter()
            .map(|m| m.abbrev().to_string())
            .collect();
        assert_eq!(first, again, "Enumeration order must be deterministic");
    }

    // Shortest first
    assert_eq!(first[0], "CtD");
    let lengths: Vec<usize> = metagraph
        .extract_metapaths(&source, &target, 3)
        .unwrap()
        .iter()
        .map(|m| m.len())
        .collect();
    assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_enumeration_reuses_cached_paths() {
    let metagraph = build_hetionet_metagraph();
    let compound = Kind::from("Compound");
    let gene = Kind::from("Gene");

    let first = metagraph.extract_metapaths(&compound, &gene, 3).unwrap();
    let cached = metagraph.metapath_count();
    let second = metagraph.extract_metapaths(&compound, &gene, 3).unwrap();

    assert_eq!(metagraph.metapath_count(), cached, "Cache must not grow on repeat");
    for (a, b) in first.iter().zip(second.iter()) {
        assert!(Arc::ptr_eq(a, b));
    }

    // Reverse enumeration finds the cached inverses
    let reverse = metagraph.extract_metapaths(&gene, &compound, 3).unwrap();
    assert_eq!(reverse.len(), first.len());
    for metapath in &first {
        let inverse = metagraph.inverse_of(metapath).unwrap();
        assert!(reverse.iter().any(|r| Arc::ptr_eq(r, &inverse)));
    }
}

#[test]
fn test_abbreviation_round_trip() {
    let metagraph = build_hetionet_metagraph();
    for source in metagraph.get_nodes() {
        for target in metagraph.get_nodes() {
            let metapaths = metagraph
                .extract_metapaths(source.kind(), target.kind(), 2)
                .unwrap();
            for metapath in metapaths {
                let parsed = metagraph.metapath_from_abbrev(metapath.abbrev()).unwrap();
                assert!(
                    Arc::ptr_eq(&parsed, &metapath),
                    "{} did not round trip",
                    metapath.abbrev()
                );
            }
        }
    }
}

#[test]
fn test_directed_metapath_abbrevs() {
    let metagraph = build_hetionet_metagraph();
    let metapath = metagraph.metapath_from_abbrev("CbGr>GaD").unwrap();
    assert_eq!(metapath.len(), 3);
    let inverse = metagraph.inverse_of(&metapath).unwrap();
    assert_eq!(inverse.abbrev(), "DaG<rGbC");
    assert_eq!(
        metapath.unicode_str(),
        "Compound–binds–Gene→regulates→Gene–associates–Disease"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// INSTANCE GRAPH TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_leave_one_out_masking() {
    let metagraph = Arc::new(build_hetionet_metagraph());
    let treats = metaedge("Compound", "Disease", "treats", Direction::Both);

    let mut g = Graph::new(Arc::clone(&metagraph));
    let compounds = ["DB00997", "DB01048", "DB00563"];
    for id in compounds {
        g.add_node("Compound", id, None, None).unwrap();
    }
    g.add_node("Disease", "DOID:1612", Some("breast cancer"), None).unwrap();
    let disease = NodeId::new("Disease", "DOID:1612");

    let mut edge_ids = Vec::new();
    for id in compounds {
        let (edge, _) = g
            .add_edge(&NodeId::new("Compound", id), &disease, "treats", Direction::Both, None)
            .unwrap();
        edge_ids.push(edge);
    }

    // Hold out each treatment in turn
    for edge_id in &edge_ids {
        let edge = g.get_edge(edge_id).unwrap();
        let inverse_id = edge.inverse_id();
        g.mask_edge(&inverse_id).unwrap();

        let visible = g
            .get_node_edges(&disease, &treats.inverse(), true)
            .unwrap();
        assert_eq!(visible.len(), compounds.len() - 1);
        assert!(visible.iter().all(|e| e.id() != &inverse_id));

        g.unmask_all();
    }

    let all = g.get_node_edges(&disease, &treats.inverse(), true).unwrap();
    assert_eq!(all.len(), compounds.len());
}

#[test]
fn test_instance_path_matches_metapath() {
    let metagraph = Arc::new(build_hetionet_metagraph());
    let mut g = Graph::new(Arc::clone(&metagraph));
    g.add_node("Compound", "DB00997", Some("Doxorubicin"), None).unwrap();
    g.add_node("Gene", 1636i64, Some("ACE"), None).unwrap();
    g.add_node("Gene", 4524i64, Some("MTHFR"), None).unwrap();
    g.add_node("Disease", "DOID:1612", Some("breast cancer"), None).unwrap();

    let compound = NodeId::new("Compound", "DB00997");
    let ace = NodeId::new("Gene", 1636i64);
    let mthfr = NodeId::new("Gene", 4524i64);
    let disease = NodeId::new("Disease", "DOID:1612");

    let (e1, _) = g.add_edge(&compound, &ace, "binds", Direction::Both, None).unwrap();
    let (e2, _) = g.add_edge(&ace, &mthfr, "regulates", Direction::Forward, None).unwrap();
    let (e3, _) = g.add_edge(&mthfr, &disease, "associates", Direction::Both, None).unwrap();

    let path = g.get_path(vec![e1, e2, e3]).unwrap();
    let metapath = g.metapath_of(&path).unwrap();
    assert!(Arc::ptr_eq(
        &metapath,
        &metagraph.metapath_from_abbrev("CbGr>GaD").unwrap()
    ));
    assert_eq!(
        g.path_unicode_str(&path),
        "Doxorubicin–binds–ACE→regulates→MTHFR–associates–breast cancer"
    );

    let inverse = g.get_path(path.inverse_edges()).unwrap();
    assert_eq!(inverse.source(), &disease);
    assert!(Arc::ptr_eq(
        &g.metapath_of(&inverse).unwrap(),
        &metagraph.inverse_of(&metapath).unwrap()
    ));
}
