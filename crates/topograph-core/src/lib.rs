//! Topograph Core - application topology graphs, diffs and diagrams
//!
//! This crate turns the resource graph of an infrastructure-as-code
//! application into documentation:
//! - Typed node/edge graph model built from normalized records
//! - Image/tag, repository URL and staleness enrichment
//! - Structural diff between two snapshots with name-based identity
//! - Mermaid rendering of a graph, a diff and the baseline/head comparison
//! - Source-line and PR file-diff deep links
//! - PR comment assembly and README embedding
//!
//! Everything here is a pure transformation; file and network access live
//! in the CLI.

pub mod diff;
pub mod errors;
pub mod links;
pub mod logging_facility;
pub mod metadata;
pub mod model;
pub mod render;
pub mod snapshot;

#[doc(hidden)]
pub use topograph_core_types;

// Re-export commonly used types
pub use diff::{compute_diff, DiffResult, DiffStatus, NodeField};
pub use errors::{Result, TgError, TgErrorKind, TopographError};
pub use links::{DiffSide, LinkContext};
pub use metadata::{resolve_graph_metadata, MetadataInputs, ResolvedMetadata};
pub use model::{build_graph, ConnectionRecord, Edge, Graph, Node, NodeKind, ResourceRecord};
pub use render::{render, render_diff, RenderOptions};
