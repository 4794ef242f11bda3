//! Metadata Resolver and Staleness Annotator Tests
//!
//! ## Scenarios Covered
//!
//! 1. Image/tag resolution for explicit, bare and missing images
//! 2. Non-container nodes never carry image metadata
//! 3. Repository URL inference and explicit override
//! 4. Staleness annotation is suppressed for zero or unknown counts

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::{TimeZone, Utc};
use common::{container, datastore, resolved, CONTAINER};
use proptest::prelude::*;
use topograph_core::metadata::{
    annotate_staleness, infer_repo_url, resolve_graph_metadata, resolve_image_metadata,
    split_image_ref, staleness_warning, MetadataInputs, RegistryMapping, RepoUrlResolver,
    ResolvedMetadata,
};
use topograph_core::model::{build_graph, Node, ResourceRecord};

fn container_node(name: &str) -> Node {
    Node::new(name, name, CONTAINER, "app.bicep", 7)
}

#[test]
fn test_explicit_image_splits_on_last_colon() {
    let node = resolve_image_metadata(&container_node("web"), Some("ghcr.io/x/y:latest"));
    assert_eq!(node.image.as_deref(), Some("ghcr.io/x/y"));
    assert_eq!(node.tag.as_deref(), Some("latest"));

    let with_port = resolve_image_metadata(&container_node("web"), Some("registry:5000/app:2.0"));
    assert_eq!(with_port.image.as_deref(), Some("registry:5000/app"));
    assert_eq!(with_port.tag.as_deref(), Some("2.0"));
}

#[test]
fn test_bare_image_defaults_to_latest() {
    let node = resolve_image_metadata(&container_node("cache"), Some("redis"));
    assert_eq!(node.image.as_deref(), Some("redis"));
    assert_eq!(node.tag.as_deref(), Some("latest"));
}

#[test]
fn test_missing_image_falls_back_to_display_name() {
    let node = resolve_image_metadata(&container_node("frontend"), None);
    assert_eq!(node.image.as_deref(), Some("frontend"));
    assert_eq!(node.tag.as_deref(), Some("latest"));

    let templated =
        resolve_image_metadata(&container_node("frontend"), Some("[parameters('image')]"));
    assert_eq!(templated.image.as_deref(), Some("frontend"));
}

#[test]
fn test_non_container_has_no_image() {
    let graph = resolved(&[datastore("db", 3)], &[]);
    let db = graph.node("db").unwrap();
    assert_eq!(db.image, None);
    assert_eq!(db.tag, None);
}

#[test]
fn test_repo_url_inference() {
    assert_eq!(
        infer_repo_url("ghcr.io/acme/api", None).as_deref(),
        Some("https://github.com/acme/api")
    );
    assert_eq!(infer_repo_url("docker.io/library/redis", None), None);
    assert_eq!(infer_repo_url("ghcr.io/acme", None), None);
    assert_eq!(infer_repo_url("ghcr.io/acme/team/api", None), None);
    assert_eq!(
        infer_repo_url("redis", Some("https://git.example/cache")).as_deref(),
        Some("https://git.example/cache")
    );
}

#[test]
fn test_registry_table_is_extensible() {
    let resolver =
        RepoUrlResolver::default().with_mapping("registry.gitlab.com", "https://gitlab.com");
    assert_eq!(
        resolver.mappings().last(),
        Some(&RegistryMapping::new("registry.gitlab.com", "https://gitlab.com"))
    );
    assert_eq!(
        resolver.infer(Some("registry.gitlab.com/acme/api"), None).as_deref(),
        Some("https://gitlab.com/acme/api")
    );
    assert_eq!(
        resolver.infer(Some("ghcr.io/acme/api"), None).as_deref(),
        Some("https://github.com/acme/api")
    );
}

#[test]
fn test_staleness_zero_count_suppressed() {
    let node = resolve_image_metadata(&container_node("backend"), None);
    let published = Some(Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap());

    let fresh = annotate_staleness(&node, published, Some(0));
    assert_eq!(fresh.staleness, None);
    assert_eq!(staleness_warning(&fresh), None);

    let unknown = annotate_staleness(&node, None, Some(4));
    assert_eq!(unknown.staleness, None);
}

#[test]
fn test_staleness_label_line() {
    let node = resolve_image_metadata(&container_node("backend"), None);
    let published = Some(Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap());
    let stale = annotate_staleness(&node, published, Some(12));
    assert_eq!(
        staleness_warning(&stale).as_deref(),
        Some("⚠️ 12 commits after latest tag")
    );
}

#[test]
fn test_resolve_graph_metadata_end_to_end() {
    let graph = build_graph(
        &[
            container("frontend", 10, "ghcr.io/acme/frontend:3.2"),
            ResourceRecord::new("worker", CONTAINER, "app.bicep", 20),
        ],
        &[],
    )
    .unwrap();
    let mut inputs = MetadataInputs::new();
    inputs.insert(
        "frontend".to_string(),
        ResolvedMetadata {
            tag: Some("3.2".to_string()),
            published_at: Some(Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap()),
            commits_since_publish: Some(3),
            repository_url: None,
        },
    );

    let enriched = resolve_graph_metadata(&graph, &inputs);
    let frontend = enriched.node("frontend").unwrap();
    assert_eq!(frontend.image_ref().as_deref(), Some("ghcr.io/acme/frontend:3.2"));
    assert_eq!(
        frontend.inferred_repo_url.as_deref(),
        Some("https://github.com/acme/frontend")
    );
    assert_eq!(frontend.staleness.map(|s| s.commits_since_publish), Some(3));

    let worker = enriched.node("worker").unwrap();
    assert_eq!(worker.image_ref().as_deref(), Some("worker:latest"));
    assert_eq!(worker.inferred_repo_url, None);

    // the input graph is untouched
    assert_eq!(graph.node("frontend").unwrap().image, None);
}

proptest! {
    #[test]
    fn prop_split_image_ref_reassembles(
        name in "[a-z][a-z0-9./-]{0,20}",
        tag in "[a-zA-Z0-9._-]{1,10}",
    ) {
        let raw = format!("{}:{}", name, tag);
        let (image, parsed_tag) = split_image_ref(&raw);
        prop_assert_eq!(image, name);
        prop_assert_eq!(parsed_tag, tag);
    }

    #[test]
    fn prop_colonless_image_tags_latest(name in "[a-z][a-z0-9./-]{0,20}") {
        let (image, tag) = split_image_ref(&name);
        prop_assert_eq!(image, name);
        prop_assert_eq!(tag, "latest");
    }
}
