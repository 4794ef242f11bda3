//! Graph Model Tests
//!
//! ## Scenarios Covered
//!
//! 1. Construction is deterministic and preserves record order
//! 2. Dangling and duplicate input fails with the offending ids
//! 3. Kind classification table
//! 4. Structural equality ignores record order

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{conn, container, datastore, APPLICATION, CONTAINER};
use proptest::prelude::*;
use topograph_core::errors::{TgError, TgErrorKind, TopographError};
use topograph_core::model::{build_graph, classify_kind, NodeKind, ResourceRecord};

#[test]
fn test_build_graph_is_deterministic() {
    // S1: identical input twice yields equal graphs
    let resources = vec![
        container("frontend", 10, "nginx:alpine"),
        container("backend", 20, "ghcr.io/acme/backend:1.0"),
        datastore("cache", 30),
    ];
    let connections = vec![conn("frontend", "backend"), conn("backend", "cache")];

    let a = build_graph(&resources, &connections).unwrap();
    let b = build_graph(&resources, &connections).unwrap();

    assert_eq!(a, b);
    assert!(a.structurally_eq(&b));
    assert_eq!(
        a.node_ids().collect::<Vec<_>>(),
        vec!["frontend", "backend", "cache"]
    );
}

#[test]
fn test_every_edge_endpoint_exists() {
    let graph = build_graph(
        &[container("a", 1, "a"), container("b", 2, "b")],
        &[conn("a", "b"), conn("b", "a")],
    )
    .unwrap();

    for edge in graph.edges() {
        assert!(graph.contains(&edge.from));
        assert!(graph.contains(&edge.to));
    }
}

#[test]
fn test_dangling_edge_is_malformed_input() {
    // S2: connection to an undeclared id
    let err = build_graph(&[container("frontend", 1, "x")], &[conn("frontend", "ghost")])
        .unwrap_err();

    assert_eq!(
        err,
        TopographError::DanglingEdge {
            from: "frontend".to_string(),
            to: "ghost".to_string(),
            missing: vec!["ghost".to_string()],
        }
    );

    let tg: TgError = err.into();
    assert_eq!(tg.kind(), TgErrorKind::DanglingEdge);
    assert!(tg.kind().is_malformed_input());
    assert_eq!(tg.offending_ids(), Some(&["ghost".to_string()][..]));
}

#[test]
fn test_duplicate_node_id_is_malformed_input() {
    let err = build_graph(
        &[container("api", 1, "x"), datastore("api", 2)],
        &[],
    )
    .unwrap_err();

    assert_eq!(
        err,
        TopographError::DuplicateNodeId {
            node_id: "api".to_string()
        }
    );
    assert_eq!(err.code(), "ERR_DUPLICATE_NODE_ID");
}

#[test]
fn test_kind_classification_table() {
    let cases = [
        ("Applications.Core/containers", NodeKind::Container),
        ("applications.core/CONTAINERS", NodeKind::Container),
        ("Applications.Datastores/redisCaches", NodeKind::Datastore),
        ("Applications.Datastores/sqlDatabases", NodeKind::Datastore),
        ("Applications.Datastores/mongoDatabases", NodeKind::Datastore),
        ("Applications.Core/applications", NodeKind::Application),
        ("Applications.Core/gateways", NodeKind::Other),
        ("Applications.Dapr/stateStores", NodeKind::Other),
        ("", NodeKind::Other),
    ];
    for (type_string, expected) in cases {
        assert_eq!(classify_kind(type_string), expected, "type {}", type_string);
    }
}

#[test]
fn test_application_node_is_modelled_but_not_drawn() {
    let graph = build_graph(
        &[
            ResourceRecord::new("shop", APPLICATION, "app.bicep", 1),
            ResourceRecord::new("web", CONTAINER, "app.bicep", 5),
        ],
        &[conn("web", "shop")],
    )
    .unwrap();

    let app = graph.node("shop").unwrap();
    assert_eq!(app.kind, NodeKind::Application);
    assert!(!app.is_drawn());
    assert_eq!(graph.edges().len(), 1);
}

#[test]
fn test_structural_equality_ignores_order_but_not_attributes() {
    // S4: reordered records are structurally equal; a moved line is not
    let a = build_graph(
        &[container("x", 1, "x"), datastore("y", 2)],
        &[conn("x", "y")],
    )
    .unwrap();
    let reordered = build_graph(
        &[datastore("y", 2), container("x", 1, "x")],
        &[conn("x", "y")],
    )
    .unwrap();
    let moved = build_graph(
        &[container("x", 1, "x"), datastore("y", 3)],
        &[conn("x", "y")],
    )
    .unwrap();

    assert_ne!(a, reordered);
    assert!(a.structurally_eq(&reordered));
    assert!(!a.structurally_eq(&moved));
}

proptest! {
    #[test]
    fn prop_build_graph_deterministic(
        names in proptest::collection::btree_set("[a-z]{1,6}", 1..8),
        pairs in proptest::collection::vec((0usize..8, 0usize..8), 0..12),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let resources: Vec<ResourceRecord> = names
            .iter()
            .enumerate()
            .map(|(i, n)| ResourceRecord::new(n.clone(), CONTAINER, "app.bicep", i as u32 + 1))
            .collect();
        let connections: Vec<_> = pairs
            .iter()
            .map(|(a, b)| conn(&names[a % names.len()], &names[b % names.len()]))
            .collect();

        let first = build_graph(&resources, &connections).unwrap();
        let second = build_graph(&resources, &connections).unwrap();
        prop_assert!(first.structurally_eq(&second));
        prop_assert_eq!(first.len(), names.len());
        prop_assert!(first.edges().len() <= connections.len());
        for edge in first.edges() {
            prop_assert!(first.contains(&edge.from) && first.contains(&edge.to));
        }
    }
}
