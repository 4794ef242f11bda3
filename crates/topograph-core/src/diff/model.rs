//! Graph diff output types.
//!
//! Collections use `BTreeMap`/`BTreeSet` so iteration (and therefore every
//! rendering derived from a diff) is in ascending key order.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::model::{Edge, Graph, Node};

/// Four-way classification of a node or edge between baseline and head
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    /// Present only in head
    Added,
    /// Present only in baseline
    Removed,
    /// Present in both with at least one tracked attribute differing
    Modified,
    Unchanged,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffStatus::Added => "added",
            DiffStatus::Removed => "removed",
            DiffStatus::Modified => "modified",
            DiffStatus::Unchanged => "unchanged",
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, DiffStatus::Unchanged)
    }
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node attributes whose difference makes a node `modified`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeField {
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "tag")]
    Tag,
    #[serde(rename = "kind")]
    Kind,
    #[serde(rename = "sourceLine")]
    SourceLine,
    #[serde(rename = "connections")]
    Connections,
}

impl NodeField {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeField::Image => "image",
            NodeField::Tag => "tag",
            NodeField::Kind => "kind",
            NodeField::SourceLine => "sourceLine",
            NodeField::Connections => "connections",
        }
    }
}

impl fmt::Display for NodeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-status node counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffCounts {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
}

/// Read-only structural diff between a baseline and a head graph.
///
/// Built by [`compute_diff`](crate::diff::compute_diff); owns both graphs so
/// that renderers can reach node details for every classified id.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffResult {
    pub(crate) baseline: Graph,
    pub(crate) head: Graph,
    pub(crate) node_status: BTreeMap<String, DiffStatus>,
    pub(crate) edge_status: BTreeMap<Edge, DiffStatus>,
    pub(crate) modified_fields: BTreeMap<String, BTreeSet<NodeField>>,
}

impl DiffResult {
    pub fn baseline(&self) -> &Graph {
        &self.baseline
    }

    pub fn head(&self) -> &Graph {
        &self.head
    }

    /// Status of every node id in the union of both graphs
    pub fn node_statuses(&self) -> &BTreeMap<String, DiffStatus> {
        &self.node_status
    }

    /// Status of every edge in the union of both graphs
    pub fn edge_statuses(&self) -> &BTreeMap<Edge, DiffStatus> {
        &self.edge_status
    }

    pub fn node_status(&self, id: &str) -> Option<DiffStatus> {
        self.node_status.get(id).copied()
    }

    pub fn edge_status(&self, edge: &Edge) -> Option<DiffStatus> {
        self.edge_status.get(edge).copied()
    }

    /// Differing attributes of a `modified` node
    pub fn modified_fields(&self, id: &str) -> Option<&BTreeSet<NodeField>> {
        self.modified_fields.get(id)
    }

    /// The node as it should be shown: the head version, or the baseline
    /// version for removed nodes.
    pub fn display_node(&self, id: &str) -> Option<&Node> {
        self.head.node(id).or_else(|| self.baseline.node(id))
    }

    /// Node ids with `status`, ascending
    pub fn nodes_with(&self, status: DiffStatus) -> Vec<&str> {
        self.node_status
            .iter()
            .filter(|(_, s)| **s == status)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Edges with `status`, ascending
    pub fn edges_with(&self, status: DiffStatus) -> Vec<&Edge> {
        self.edge_status
            .iter()
            .filter(|(_, s)| **s == status)
            .map(|(edge, _)| edge)
            .collect()
    }

    pub fn counts(&self) -> DiffCounts {
        let mut counts = DiffCounts::default();
        for status in self.node_status.values() {
            match status {
                DiffStatus::Added => counts.added += 1,
                DiffStatus::Removed => counts.removed += 1,
                DiffStatus::Modified => counts.modified += 1,
                DiffStatus::Unchanged => counts.unchanged += 1,
            }
        }
        counts
    }

    /// True if any node or edge is not `unchanged`
    pub fn has_changes(&self) -> bool {
        self.node_status.values().any(DiffStatus::is_change)
            || self.edge_status.values().any(DiffStatus::is_change)
    }
}
