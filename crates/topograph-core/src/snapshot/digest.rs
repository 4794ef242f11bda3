//! Digest computation for graphs and rendered output.
//!
//! Provides deterministic SHA256 digests used as the "did anything change"
//! signal before committing a refreshed snapshot or diagram.
//!
//! ## Digest Types
//!
//! - **Graph Digest**: hash of the graph's canonical form; insensitive to
//!   record order, so two graphs that are [`structurally_eq`] share a digest
//! - **Text Digest**: hash of rendered text, byte for byte
//!
//! [`structurally_eq`]: crate::model::Graph::structurally_eq

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::Result;
use crate::model::{Edge, Graph, Node};

#[derive(Serialize)]
struct CanonicalGraph<'a> {
    nodes: Vec<&'a Node>,
    edges: Vec<&'a Edge>,
}

/// Compute the structural digest of a graph.
///
/// Nodes are ordered by id and edges by `(from, to)` before hashing.
///
/// ## Errors
///
/// Returns `TopographError::Serialization` if JSON serialization fails.
///
/// ## Example
///
/// ```no_run
/// use topograph_core::model::Graph;
/// use topograph_core::snapshot::digest::graph_digest;
///
/// let digest = graph_digest(&Graph::empty()).unwrap();
/// assert_eq!(digest.len(), 64);
/// ```
pub fn graph_digest(graph: &Graph) -> Result<String> {
    let mut nodes: Vec<&Node> = graph.nodes().iter().collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));
    let edges: Vec<&Edge> = graph.edge_set().into_iter().collect();

    let canonical = serde_json::to_string(&CanonicalGraph { nodes, edges })?;
    Ok(hash_string(&canonical))
}

/// Digest of rendered text (a diagram or a comment)
pub fn text_digest(text: &str) -> String {
    hash_string(text)
}

fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
