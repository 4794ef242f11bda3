//! Snapshot Reader and Digest Tests
//!
//! ## Scenarios Covered
//!
//! 1. `rad app graph` output with a preamble normalizes to records
//! 2. Connection endpoint resolution and filtering
//! 3. Invalid documents fail with a snapshot error
//! 4. Digests track structural change only

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{shop_baseline, RAD_GRAPH_OUTPUT};
use topograph_core::errors::TopographError;
use topograph_core::metadata::{resolve_graph_metadata, MetadataInputs};
use topograph_core::model::{ConnectionRecord, NodeKind};
use topograph_core::snapshot::{graph_digest, load_snapshot, parse_rad_graph, text_digest};

#[test]
fn test_parse_rad_graph_resources() {
    let records = parse_rad_graph(RAD_GRAPH_OUTPUT).unwrap();

    let ids: Vec<&str> = records.resources.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["shop", "frontend", "backend", "cache"]);
    assert_eq!(records.source_file.as_deref(), Some("app.bicep"));

    let frontend = &records.resources[1];
    assert_eq!(frontend.display_name, "frontend");
    assert_eq!(frontend.type_string, "Applications.Core/containers");
    assert_eq!(frontend.source_file, "app.bicep");
    assert_eq!(frontend.source_line, 18);
    assert_eq!(
        frontend.properties.lookup_str(&["container", "image"]),
        Some("ghcr.io/acme/frontend:2.1")
    );

    // no file in sourceLocation
    assert_eq!(records.resources[2].source_file, "");
}

#[test]
fn test_parse_rad_graph_connections() {
    // S2: URL host, ARM reference, dependsOn, duplicate, unknown host, self-loop
    let records = parse_rad_graph(RAD_GRAPH_OUTPUT).unwrap();
    assert_eq!(
        records.connections,
        vec![
            ConnectionRecord::new("frontend", "backend"),
            ConnectionRecord::new("backend", "cache"),
        ]
    );
}

#[test]
fn test_load_snapshot_and_resolve() {
    let snapshot = load_snapshot(RAD_GRAPH_OUTPUT).unwrap();
    let graph = resolve_graph_metadata(&snapshot.graph, &MetadataInputs::new());

    assert_eq!(graph.node("shop").unwrap().kind, NodeKind::Application);
    let backend = graph.node("backend").unwrap();
    assert_eq!(backend.image_ref().as_deref(), Some("backend:latest"));
    let frontend = graph.node("frontend").unwrap();
    assert_eq!(frontend.tag.as_deref(), Some("2.1"));
    assert_eq!(
        frontend.inferred_repo_url.as_deref(),
        Some("https://github.com/acme/frontend")
    );
    assert_eq!(snapshot.source_file.as_deref(), Some("app.bicep"));
}

#[test]
fn test_source_file_falls_back_to_first_resource() {
    let raw = r#"{
        "resources": [
            { "id": "/x/containers/api", "name": "api", "type": "Applications.Core/containers",
              "sourceLocation": { "file": "infra/main.bicep", "line": 4 } }
        ]
    }"#;
    let records = parse_rad_graph(raw).unwrap();
    assert_eq!(records.source_file.as_deref(), Some("infra/main.bicep"));
    assert!(records.connections.is_empty());
}

#[test]
fn test_invalid_documents() {
    // S3
    assert!(matches!(
        parse_rad_graph("Error: application not found"),
        Err(TopographError::InvalidSnapshot { .. })
    ));
    assert!(matches!(
        parse_rad_graph("{ \"resources\": [ }"),
        Err(TopographError::InvalidSnapshot { .. })
    ));
    assert_eq!(
        parse_rad_graph(r#"{ "resources": [ { "id": "/x", "type": "t" } ] }"#).unwrap_err(),
        TopographError::MissingField {
            index: 0,
            field: "name".to_string()
        }
    );
}

#[test]
fn test_duplicate_names_surface_from_build() {
    let raw = r#"{
        "resources": [
            { "id": "/a/containers/api", "name": "api", "type": "Applications.Core/containers" },
            { "id": "/b/containers/api", "name": "api", "type": "Applications.Core/containers" }
        ]
    }"#;
    assert_eq!(
        load_snapshot(raw).unwrap_err(),
        TopographError::DuplicateNodeId {
            node_id: "api".to_string()
        }
    );
}

#[test]
fn test_digests() {
    // S4
    let a = graph_digest(&shop_baseline()).unwrap();
    let b = graph_digest(&shop_baseline()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);

    let other = load_snapshot(RAD_GRAPH_OUTPUT).unwrap().graph;
    assert_ne!(a, graph_digest(&other).unwrap());

    assert_eq!(text_digest("graph LR"), text_digest("graph LR"));
    assert_ne!(text_digest("graph LR"), text_digest("graph LR\n"));
}
