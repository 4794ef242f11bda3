//! Graph diff computation engine.
//!
//! The entry point is [`compute_diff`], which classifies every node and edge
//! of two graphs. Identity is the node id: a renamed resource shows up as one
//! removal plus one addition.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use crate::diff::model::{DiffResult, DiffStatus, NodeField};
use crate::model::{Edge, Graph, Node};
use crate::{log_op_end, log_op_start};

/// Outgoing targets of `id` in `graph`, restricted to ids in `shared`
fn connection_set<'a>(graph: &'a Graph, id: &'a str, shared: &BTreeSet<&str>) -> BTreeSet<&'a str> {
    graph
        .outgoing(id)
        .filter(|target| shared.contains(target))
        .collect()
}

/// Tracked attributes that differ between two versions of a node
fn changed_fields(
    base: &Node,
    head: &Node,
    base_conns: &BTreeSet<&str>,
    head_conns: &BTreeSet<&str>,
) -> BTreeSet<NodeField> {
    let mut fields = BTreeSet::new();
    if base.image != head.image {
        fields.insert(NodeField::Image);
    }
    if base.tag != head.tag {
        fields.insert(NodeField::Tag);
    }
    if base.kind != head.kind {
        fields.insert(NodeField::Kind);
    }
    if base.source_line != head.source_line {
        fields.insert(NodeField::SourceLine);
    }
    if base_conns != head_conns {
        fields.insert(NodeField::Connections);
    }
    fields
}

/// Classify an edge, letting an added/removed endpoint decide first
fn classify_edge(
    edge: &Edge,
    in_baseline: bool,
    in_head: bool,
    node_status: &BTreeMap<String, DiffStatus>,
) -> DiffStatus {
    let endpoints = [node_status.get(&edge.from), node_status.get(&edge.to)];
    if endpoints.contains(&Some(&DiffStatus::Added)) {
        return DiffStatus::Added;
    }
    if endpoints.contains(&Some(&DiffStatus::Removed)) {
        return DiffStatus::Removed;
    }
    match (in_baseline, in_head) {
        (true, true) => DiffStatus::Unchanged,
        (false, true) => DiffStatus::Added,
        _ => DiffStatus::Removed,
    }
}

/// Compute the structural diff between `baseline` and `head`.
///
/// - head-only ids are `added`, baseline-only ids are `removed`
/// - shared ids are `modified` when image, tag, kind, source line or
///   connection set differ, `unchanged` otherwise
/// - a node's connection set only counts targets present in both graphs,
///   so gaining or losing a neighbour does not modify the survivor
/// - edges are never `modified`
///
/// Pure and deterministic: equal inputs produce equal results.
pub fn compute_diff(baseline: &Graph, head: &Graph) -> DiffResult {
    let start = Instant::now();
    log_op_start!(
        "compute_diff",
        baseline_nodes = baseline.len(),
        head_nodes = head.len()
    );

    let base_ids: BTreeSet<&str> = baseline.node_ids().collect();
    let head_ids: BTreeSet<&str> = head.node_ids().collect();
    let shared: BTreeSet<&str> = base_ids.intersection(&head_ids).copied().collect();

    let mut node_status = BTreeMap::new();
    let mut modified_fields = BTreeMap::new();

    for id in base_ids.union(&head_ids) {
        let status = match (baseline.node(id), head.node(id)) {
            (None, Some(_)) => DiffStatus::Added,
            (Some(_), None) => DiffStatus::Removed,
            (Some(base), Some(current)) => {
                let fields = changed_fields(
                    base,
                    current,
                    &connection_set(baseline, id, &shared),
                    &connection_set(head, id, &shared),
                );
                if fields.is_empty() {
                    DiffStatus::Unchanged
                } else {
                    modified_fields.insert(id.to_string(), fields);
                    DiffStatus::Modified
                }
            }
            (None, None) => continue,
        };
        node_status.insert(id.to_string(), status);
    }

    let base_edges = baseline.edge_set();
    let head_edges = head.edge_set();
    let edge_status: BTreeMap<Edge, DiffStatus> = base_edges
        .union(&head_edges)
        .map(|edge| {
            let status = classify_edge(
                edge,
                base_edges.contains(edge),
                head_edges.contains(edge),
                &node_status,
            );
            ((*edge).clone(), status)
        })
        .collect();

    let result = DiffResult {
        baseline: baseline.clone(),
        head: head.clone(),
        node_status,
        edge_status,
        modified_fields,
    };

    let counts = result.counts();
    log_op_end!(
        "compute_diff",
        duration_ms = start.elapsed().as_millis() as u64,
        added = counts.added,
        removed = counts.removed,
        modified = counts.modified,
        unchanged = counts.unchanged
    );

    result
}
