//! Mermaid flowchart serialization of graphs and diffs.
//!
//! Output is a pure function of the input graph (or diff) and the render
//! options: node lines follow graph order (single) or ascending id order
//! (diff), so identical inputs always produce byte-identical text.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use crate::diff::{DiffResult, DiffStatus};
use crate::links::{DiffSide, LinkContext};
use crate::metadata::staleness_warning;
use crate::model::{Edge, Graph, Node};
use crate::render::style::{StyleTable, FLOWCHART};
use crate::{log_op_end, log_op_start};

/// Mermaid keywords that cannot be used as bare node ids
const RESERVED_IDS: &[&str] = &[
    "end",
    "graph",
    "subgraph",
    "flowchart",
    "click",
    "style",
    "class",
    "classdef",
    "linkstyle",
];

/// Options for one rendering call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Add `image:tag` and staleness lines to labels
    pub detailed: bool,
    pub links: LinkContext,
    pub style: StyleTable,
}

impl RenderOptions {
    pub fn new(links: LinkContext) -> Self {
        Self {
            detailed: false,
            links,
            style: StyleTable::default(),
        }
    }

    pub fn with_detailed(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    /// Same options with links anchored to `side`
    pub fn with_side(&self, side: DiffSide) -> Self {
        Self {
            links: self.links.with_side(side),
            ..self.clone()
        }
    }
}

/// The three diagrams of a PR comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub baseline: String,
    pub head: String,
    pub diff: String,
}

/// Reduce an id to Mermaid-safe characters
pub fn sanitize_id(id: &str) -> String {
    let mut out: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if out.is_empty() {
        out.push_str("node");
    }
    if RESERVED_IDS.contains(&out.to_ascii_lowercase().as_str()) {
        out.push('_');
    }
    out
}

/// Escape text placed inside a quoted Mermaid label or tooltip
pub fn escape_label(text: &str) -> String {
    text.replace('"', "#quot;")
}

/// Assigns unique Mermaid ids in order of first appearance.
///
/// The first node to sanitize to a given id keeps it; later ones get `_2`,
/// `_3`, ... appended.
#[derive(Debug, Default)]
struct IdAllocator {
    assigned: BTreeMap<String, String>,
    taken: BTreeSet<String>,
}

impl IdAllocator {
    fn allocate(&mut self, id: &str) -> String {
        if let Some(existing) = self.assigned.get(id) {
            return existing.clone();
        }
        let base = sanitize_id(id);
        let mut candidate = base.clone();
        let mut n = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }
        self.taken.insert(candidate.clone());
        self.assigned.insert(id.to_string(), candidate.clone());
        candidate
    }

    fn get(&self, id: &str) -> Option<&str> {
        self.assigned.get(id).map(String::as_str)
    }
}

/// Label for `node`: bold name, then detail lines joined with `<br/>`
fn node_label(node: &Node, prefix: &str, options: &RenderOptions) -> String {
    let mut parts = vec![format!(
        "<b>{}{}</b>",
        prefix,
        escape_label(&node.display_name)
    )];
    if options.detailed {
        if let Some(image_ref) = node.image_ref() {
            parts.push(format!(
                "<span style='color:{}'>{}</span>",
                options.style.detail_color,
                escape_label(&image_ref)
            ));
        }
        if let Some(warning) = staleness_warning(node) {
            parts.push(escape_label(&warning));
        }
    }
    parts.join("<br/>")
}

fn click_line(mermaid_id: &str, node: &Node, links: &LinkContext) -> String {
    let link = links.node_link(node);
    format!(
        "    click {} href \"{}\" \"{}\" _blank",
        mermaid_id,
        link.url,
        escape_label(&link.tooltip)
    )
}

/// Diff label prefix: `+ `, `- `, `~ ` or nothing
pub fn status_prefix(status: DiffStatus) -> &'static str {
    match status {
        DiffStatus::Added => "+ ",
        DiffStatus::Removed => "- ",
        DiffStatus::Modified => "~ ",
        DiffStatus::Unchanged => "",
    }
}

fn edge_arrow(status: DiffStatus) -> &'static str {
    match status {
        DiffStatus::Added => "-. new .->",
        DiffStatus::Removed => "-. removed .->",
        DiffStatus::Modified | DiffStatus::Unchanged => "-->",
    }
}

/// Render a single graph.
///
/// Nodes are classed by kind; application nodes and their edges are not
/// drawn. Every drawn node gets one `click` directive and every drawn edge
/// one `linkStyle` line.
pub fn render(graph: &Graph, options: &RenderOptions) -> String {
    let start = Instant::now();
    log_op_start!(
        "render",
        node_count = graph.len(),
        edge_count = graph.edges().len()
    );

    let style = &options.style;
    let mut lines = vec![style.graph_init.to_string(), FLOWCHART.to_string()];
    lines.extend(style.kind_class_defs());

    let drawn: Vec<&Node> = graph.nodes().iter().filter(|n| n.is_drawn()).collect();
    let mut ids = IdAllocator::default();
    for node in &drawn {
        let mermaid_id = ids.allocate(&node.id);
        lines.push(format!(
            "    {}[\"{}\"]:::{}",
            mermaid_id,
            node_label(node, "", options),
            node.kind.as_str()
        ));
    }

    let mut edge_count = 0;
    for edge in graph.edges() {
        if let (Some(from), Some(to)) = (ids.get(&edge.from), ids.get(&edge.to)) {
            lines.push(format!("    {} --> {}", from, to));
            edge_count += 1;
        }
    }

    for node in &drawn {
        if let Some(mermaid_id) = ids.get(&node.id) {
            lines.push(click_line(mermaid_id, node, &options.links));
        }
    }

    for i in 0..edge_count {
        lines.push(format!("    linkStyle {} {}", i, style.edge_style));
    }

    let out = lines.join("\n");
    log_op_end!(
        "render",
        duration_ms = start.elapsed().as_millis() as u64,
        node_count = drawn.len(),
        edge_count = edge_count
    );
    out
}

/// Render the colour-coded union of a diff.
///
/// Nodes are classed by status and prefixed in their label; removed nodes
/// link to the baseline side of the file diff, all others to the head side.
pub fn render_diff(diff: &DiffResult, options: &RenderOptions) -> String {
    let start = Instant::now();
    log_op_start!(
        "render_diff",
        node_count = diff.node_statuses().len(),
        edge_count = diff.edge_statuses().len()
    );

    let style = &options.style;
    let mut lines = vec![style.diff_init.to_string(), FLOWCHART.to_string()];
    lines.extend(style.status_class_defs());

    let drawn: Vec<(&Node, DiffStatus)> = diff
        .node_statuses()
        .iter()
        .filter_map(|(id, status)| diff.display_node(id).map(|n| (n, *status)))
        .filter(|(node, _)| node.is_drawn())
        .collect();

    let mut ids = IdAllocator::default();
    for (node, status) in &drawn {
        let mermaid_id = ids.allocate(&node.id);
        lines.push(format!(
            "    {}[\"{}\"]:::{}",
            mermaid_id,
            node_label(node, status_prefix(*status), options),
            status.as_str()
        ));
    }

    let mut edge_count = 0;
    for (Edge { from, to }, status) in diff.edge_statuses() {
        if let (Some(from), Some(to)) = (ids.get(from), ids.get(to)) {
            lines.push(format!("    {} {} {}", from, edge_arrow(*status), to));
            edge_count += 1;
        }
    }

    let head_links = options.links.with_side(DiffSide::Right);
    let base_links = options.links.with_side(DiffSide::Left);
    for (node, status) in &drawn {
        let links = if *status == DiffStatus::Removed {
            &base_links
        } else {
            &head_links
        };
        if let Some(mermaid_id) = ids.get(&node.id) {
            lines.push(click_line(mermaid_id, node, links));
        }
    }

    let out = lines.join("\n");
    log_op_end!(
        "render_diff",
        duration_ms = start.elapsed().as_millis() as u64,
        node_count = drawn.len(),
        edge_count = edge_count
    );
    out
}

/// Render baseline, head and diff diagrams for a PR comment.
///
/// Baseline links point at the left side of the file diff, head links at the
/// right side.
pub fn render_comparison(diff: &DiffResult, options: &RenderOptions) -> Comparison {
    Comparison {
        baseline: render(diff.baseline(), &options.with_side(DiffSide::Left)),
        head: render(diff.head(), &options.with_side(DiffSide::Right)),
        diff: render_diff(diff, options),
    }
}
