//! Graph diff engine.
//!
//! Compares a baseline graph with a head graph and classifies every node and
//! edge as added, removed, modified or unchanged.
//!
//! ## Entry point
//!
//! ```ignore
//! use topograph_core::diff::{compute_diff, summary};
//!
//! let diff = compute_diff(&baseline, &head);
//! let line = summary::counts_line(&diff);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical results, and every
//!   collection iterates in ascending key order.
//! - **Name identity**: nodes match by id only; a rename is a removal plus an
//!   addition.
//! - **Endpoint consistency**: an edge touching an added node is added, one
//!   touching a removed node is removed.

pub mod engine;
pub mod model;
pub mod summary;

pub use engine::compute_diff;
pub use model::{DiffCounts, DiffResult, DiffStatus, NodeField};
