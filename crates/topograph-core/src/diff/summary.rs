//! Markdown change tables for a graph diff.

use crate::diff::model::{DiffResult, DiffStatus};
use crate::links::{DiffSide, LinkContext};
use crate::model::Node;

/// Status cell text used in the change tables
pub fn status_badge(status: DiffStatus) -> &'static str {
    match status {
        DiffStatus::Added => "🟢 Added",
        DiffStatus::Removed => "🔴 Removed",
        DiffStatus::Modified => "🟡 Modified",
        DiffStatus::Unchanged => "⚪ Unchanged",
    }
}

/// `**name** — `type` — [file:line](url)`
///
/// The location cell is omitted when neither the node nor the context names
/// a source file.
pub fn resource_label(node: &Node, links: &LinkContext) -> String {
    let mut parts = vec![
        format!("**{}**", node.display_name),
        format!("`{}`", node.short_type()),
    ];
    let file = if node.source_file.is_empty() {
        links.default_file.as_str()
    } else {
        node.source_file.as_str()
    };
    if !file.is_empty() {
        let link = links.node_link(node);
        parts.push(format!("[{}:{}]({})", file, node.source_line, link.url));
    }
    parts.join(" — ")
}

/// Resources table, rows ordered added, removed, modified (each by id).
///
/// Returns `None` when no node changed. Removed rows link to the baseline
/// side of the file diff.
pub fn resources_table(diff: &DiffResult, links: &LinkContext) -> Option<String> {
    let mut rows = Vec::new();
    for status in [DiffStatus::Added, DiffStatus::Removed, DiffStatus::Modified] {
        let side = if status == DiffStatus::Removed {
            DiffSide::Left
        } else {
            DiffSide::Right
        };
        let ctx = links.with_side(side);
        for id in diff.nodes_with(status) {
            if let Some(node) = diff.display_node(id) {
                rows.push(format!(
                    "| {} | {} |",
                    status_badge(status),
                    resource_label(node, &ctx)
                ));
            }
        }
    }
    if rows.is_empty() {
        return None;
    }

    let mut out = String::from("#### Resources\n\n| Status | Resource |\n|--------|----------|\n");
    for row in rows {
        out.push_str(&row);
        out.push('\n');
    }
    Some(out)
}

/// Connections table, added edges first then removed ones.
///
/// Returns `None` when no edge changed.
pub fn connections_table(diff: &DiffResult) -> Option<String> {
    let name = |id: &str| {
        diff.display_node(id)
            .map(|n| n.display_name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    let mut rows = Vec::new();
    for status in [DiffStatus::Added, DiffStatus::Removed] {
        for edge in diff.edges_with(status) {
            rows.push(format!(
                "| {} | {} → {} |",
                status_badge(status),
                name(&edge.from),
                name(&edge.to)
            ));
        }
    }
    if rows.is_empty() {
        return None;
    }

    let mut out =
        String::from("#### Connections\n\n| Status | Connection |\n|--------|------------|\n");
    for row in rows {
        out.push_str(&row);
        out.push('\n');
    }
    Some(out)
}

/// `*Resources: +1 added, -2 removed, ~1 modified, 3 unchanged*`
///
/// Zero counts are left out.
pub fn counts_line(diff: &DiffResult) -> String {
    let counts = diff.counts();
    let mut parts = Vec::new();
    if counts.added > 0 {
        parts.push(format!("+{} added", counts.added));
    }
    if counts.removed > 0 {
        parts.push(format!("-{} removed", counts.removed));
    }
    if counts.modified > 0 {
        parts.push(format!("~{} modified", counts.modified));
    }
    if counts.unchanged > 0 {
        parts.push(format!("{} unchanged", counts.unchanged));
    }
    format!("*Resources: {}*", parts.join(", "))
}
