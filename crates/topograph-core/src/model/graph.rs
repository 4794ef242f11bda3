//! Immutable topology graph and its construction from records.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use super::edge::Edge;
use super::node::Node;
use super::records::{ConnectionRecord, ResourceRecord};
use crate::errors::{Result, TopographError};
use crate::{log_op_end, log_op_error, log_op_start};

/// A set of nodes (unique by id) and the directed edges between them.
///
/// Every edge endpoint exists among the nodes. Node and edge order is the
/// insertion order of the input records. A `Graph` is never mutated after
/// construction; [`Graph::map_nodes`] returns a new graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    index: BTreeMap<String, usize>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::empty()
    }
}

impl Graph {
    /// Graph with no nodes, used for a missing snapshot
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    /// Targets of edges leaving `id`
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.from == id)
            .map(|e| e.to.as_str())
    }

    pub fn edge_set(&self) -> BTreeSet<&Edge> {
        self.edges.iter().collect()
    }

    /// Return a new graph with every node transformed by `f`.
    ///
    /// `f` must not change a node's id; edges are carried over unchanged.
    pub fn map_nodes<F>(&self, f: F) -> Graph
    where
        F: Fn(&Node) -> Node,
    {
        let nodes: Vec<Node> = self
            .nodes
            .iter()
            .map(|n| {
                let mapped = f(n);
                debug_assert_eq!(mapped.id, n.id, "map_nodes must preserve node ids");
                mapped
            })
            .collect();
        Graph {
            nodes,
            edges: self.edges.clone(),
            index: self.index.clone(),
        }
    }

    /// Order-insensitive equality: same nodes by id with equal attributes,
    /// and the same edge set.
    ///
    /// This is the check a caller uses to decide whether a freshly produced
    /// graph differs from a committed snapshot.
    pub fn structurally_eq(&self, other: &Graph) -> bool {
        if self.nodes.len() != other.nodes.len() || self.edge_set() != other.edge_set() {
            return false;
        }
        self.nodes
            .iter()
            .all(|n| other.node(&n.id).is_some_and(|o| o == n))
    }
}

/// Build a graph from normalized records.
///
/// # Errors
///
/// - `DuplicateNodeId`: two resources declare the same id
/// - `DanglingEdge`: a connection names an id no resource declares; all
///   missing endpoints of that connection are reported
///
/// A connection that repeats an earlier `(from, to)` pair is collapsed into
/// the first occurrence.
pub fn build_graph(
    resources: &[ResourceRecord],
    connections: &[ConnectionRecord],
) -> Result<Graph> {
    let start = Instant::now();
    log_op_start!(
        "build_graph",
        node_count = resources.len(),
        edge_count = connections.len()
    );

    match build_graph_inner(resources, connections) {
        Ok(graph) => {
            log_op_end!(
                "build_graph",
                duration_ms = start.elapsed().as_millis() as u64,
                node_count = graph.nodes.len(),
                edge_count = graph.edges.len()
            );
            Ok(graph)
        }
        Err(err) => {
            log_op_error!(
                "build_graph",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn build_graph_inner(
    resources: &[ResourceRecord],
    connections: &[ConnectionRecord],
) -> Result<Graph> {
    let mut nodes = Vec::with_capacity(resources.len());
    let mut index = BTreeMap::new();

    for record in resources {
        if index.contains_key(&record.id) {
            return Err(TopographError::DuplicateNodeId {
                node_id: record.id.clone(),
            });
        }
        index.insert(record.id.clone(), nodes.len());
        nodes.push(Node::from_record(record));
    }

    let mut edges = Vec::with_capacity(connections.len());
    let mut seen = BTreeSet::new();

    for conn in connections {
        let missing: Vec<String> = [&conn.from, &conn.to]
            .into_iter()
            .filter(|id| !index.contains_key(*id))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if !missing.is_empty() {
            return Err(TopographError::DanglingEdge {
                from: conn.from.clone(),
                to: conn.to.clone(),
                missing,
            });
        }
        let edge = Edge::new(conn.from.clone(), conn.to.clone());
        if seen.insert(edge.clone()) {
            edges.push(edge);
        }
    }

    Ok(Graph {
        nodes,
        edges,
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;

    fn container(id: &str, line: u32) -> ResourceRecord {
        ResourceRecord::new(id, "Applications.Core/containers", "app.bicep", line)
    }

    #[test]
    fn test_build_preserves_insertion_order() {
        let graph = build_graph(
            &[container("zeta", 1), container("alpha", 2)],
            &[ConnectionRecord::new("zeta", "alpha")],
        )
        .unwrap();
        let ids: Vec<&str> = graph.node_ids().collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
        assert_eq!(graph.node("alpha").unwrap().kind, NodeKind::Container);
    }

    #[test]
    fn test_duplicate_connection_collapses() {
        let graph = build_graph(
            &[container("a", 1), container("b", 2)],
            &[ConnectionRecord::new("a", "b"), ConnectionRecord::new("a", "b")],
        )
        .unwrap();
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn test_dangling_edge_reports_both_missing_ids() {
        let err = build_graph(&[container("a", 1)], &[ConnectionRecord::new("x", "y")]).unwrap_err();
        assert_eq!(
            err,
            TopographError::DanglingEdge {
                from: "x".into(),
                to: "y".into(),
                missing: vec!["x".into(), "y".into()],
            }
        );
    }

    #[test]
    fn test_map_nodes_returns_new_graph() {
        let graph = build_graph(&[container("a", 1)], &[]).unwrap();
        let mapped = graph.map_nodes(|n| n.clone().with_image("img", "v1"));
        assert_eq!(graph.node("a").unwrap().image, None);
        assert_eq!(mapped.node("a").unwrap().image.as_deref(), Some("img"));
    }

    #[test]
    fn test_outgoing() {
        let graph = build_graph(
            &[container("a", 1), container("b", 2), container("c", 3)],
            &[ConnectionRecord::new("a", "b"), ConnectionRecord::new("a", "c")],
        )
        .unwrap();
        let targets: Vec<&str> = graph.outgoing("a").collect();
        assert_eq!(targets, vec!["b", "c"]);
        assert_eq!(graph.outgoing("b").count(), 0);
    }
}
