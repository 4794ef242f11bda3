//! Snapshot reading and change detection.

pub mod digest;
pub mod rad_graph;

pub use digest::{graph_digest, text_digest};
pub use rad_graph::parse_rad_graph;

use crate::errors::Result;
use crate::model::{build_graph, Graph};

/// A parsed snapshot: the graph plus its default source file
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub graph: Graph,
    pub source_file: Option<String>,
}

/// Parse raw `rad app graph` output and build its graph.
///
/// # Errors
///
/// Any error from [`parse_rad_graph`] or [`build_graph`].
pub fn load_snapshot(raw: &str) -> Result<Snapshot> {
    let records = parse_rad_graph(raw)?;
    let graph = build_graph(&records.resources, &records.connections)?;
    Ok(Snapshot {
        graph,
        source_file: records.source_file,
    })
}
