//! Rendering: Mermaid diagrams, PR comments and document embedding.

pub mod comment;
pub mod document;
pub mod mermaid;
pub mod style;

pub use comment::{render_comment, render_no_changes, render_section};
pub use document::{embed_between_markers, BEGIN_MARKER, END_MARKER};
pub use mermaid::{render, render_comparison, render_diff, Comparison, RenderOptions};
pub use style::StyleTable;
