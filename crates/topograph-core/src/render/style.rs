//! Fixed Mermaid styling: theme directives, class definitions, edge style.
//!
//! The palette follows the hosting platform's light theme so diagrams sit
//! naturally in a README or PR comment.

use crate::diff::DiffStatus;
use crate::model::NodeKind;

/// Theme directive for single-graph diagrams
pub const GRAPH_INIT: &str = "%%{ init: { 'theme': 'base', 'themeVariables': { \
'primaryColor': '#ffffff', \
'primaryTextColor': '#1f2328', \
'primaryBorderColor': '#d1d9e0', \
'lineColor': '#2da44e', \
'secondaryColor': '#f6f8fa', \
'tertiaryColor': '#ffffff', \
'background': '#ffffff', \
'mainBkg': '#ffffff', \
'nodeBorder': '#d1d9e0', \
'clusterBkg': '#f6f8fa', \
'clusterBorder': '#d1d9e0', \
'fontSize': '14px', \
'fontFamily': '-apple-system, BlinkMacSystemFont, Segoe UI, Noto Sans, Helvetica, Arial, sans-serif' \
} } }%%";

/// Theme directive for diff diagrams
pub const DIFF_INIT: &str = "%%{ init: { 'theme': 'base', 'themeVariables': { \
'primaryColor': '#ffffff', \
'primaryTextColor': '#1f2328', \
'primaryBorderColor': '#d1d9e0', \
'lineColor': '#656d76', \
'background': '#ffffff', \
'mainBkg': '#ffffff', \
'fontSize': '13px' \
} } }%%";

/// Flowchart direction line
pub const FLOWCHART: &str = "graph LR";

/// Muted colour of the `image:tag` line in detailed labels
pub const DETAIL_COLOR: &str = "#656d76";

/// Style applied to every drawn edge of a single-graph diagram
pub const EDGE_STYLE: &str = "stroke:#2da44e,stroke-width:1.5px";

/// Class definitions for each drawable node kind
pub const KIND_CLASSES: &[(NodeKind, &str)] = &[
    (
        NodeKind::Container,
        "fill:#ffffff,stroke:#2da44e,stroke-width:1.5px,color:#1f2328,rx:6,ry:6",
    ),
    (
        NodeKind::Datastore,
        "fill:#ffffff,stroke:#d4a72c,stroke-width:1.5px,color:#1f2328,rx:6,ry:6",
    ),
    (
        NodeKind::Other,
        "fill:#ffffff,stroke:#d1d9e0,stroke-width:1.5px,color:#1f2328,rx:6,ry:6",
    ),
];

/// Class definitions for each diff status
pub const STATUS_CLASSES: &[(DiffStatus, &str)] = &[
    (
        DiffStatus::Added,
        "fill:#dafbe1,stroke:#1a7f37,stroke-width:2px,color:#1a7f37,rx:6,ry:6",
    ),
    (
        DiffStatus::Modified,
        "fill:#fff8c5,stroke:#d4a72c,stroke-width:2px,color:#9a6700,rx:6,ry:6",
    ),
    (
        DiffStatus::Removed,
        "fill:#ffebe9,stroke:#d1242f,stroke-width:2px,stroke-dasharray:5 5,color:#d1242f,rx:6,ry:6",
    ),
    (
        DiffStatus::Unchanged,
        "fill:#ffffff,stroke:#d1d9e0,stroke-width:1px,color:#656d76,rx:6,ry:6",
    ),
];

/// Style table handed to the renderer.
///
/// The default is the only table in use; it exists as a value so that a
/// caller can swap the palette without touching the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTable {
    pub graph_init: &'static str,
    pub diff_init: &'static str,
    pub detail_color: &'static str,
    pub edge_style: &'static str,
    pub kind_classes: &'static [(NodeKind, &'static str)],
    pub status_classes: &'static [(DiffStatus, &'static str)],
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            graph_init: GRAPH_INIT,
            diff_init: DIFF_INIT,
            detail_color: DETAIL_COLOR,
            edge_style: EDGE_STYLE,
            kind_classes: KIND_CLASSES,
            status_classes: STATUS_CLASSES,
        }
    }
}

impl StyleTable {
    /// `classDef` lines for kind-styled diagrams
    pub fn kind_class_defs(&self) -> Vec<String> {
        self.kind_classes
            .iter()
            .map(|(kind, style)| format!("    classDef {} {}", kind.as_str(), style))
            .collect()
    }

    /// `classDef` lines for status-styled diagrams
    pub fn status_class_defs(&self) -> Vec<String> {
        self.status_classes
            .iter()
            .map(|(status, style)| format!("    classDef {} {}", status.as_str(), style))
            .collect()
    }
}
