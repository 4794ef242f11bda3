//! Staleness annotation from externally resolved publish data.

use chrono::{DateTime, Utc};

use crate::model::{Node, Staleness};

/// Attach a staleness annotation to a copy of `node`.
///
/// The annotation is set only when the publish date and the commit count are
/// both known, the count is non-zero, and the node has a tag to be stale
/// against. Every other combination yields a node without an annotation.
pub fn annotate_staleness(
    node: &Node,
    published_at: Option<DateTime<Utc>>,
    commits_after_publish: Option<u32>,
) -> Node {
    let staleness = match (published_at, commits_after_publish, &node.tag) {
        (Some(_), Some(count), Some(_)) if count > 0 => Some(Staleness {
            commits_since_publish: count,
        }),
        _ => None,
    };
    node.clone().with_staleness(staleness)
}

/// Label text for a stale node: `⚠️ {n} commits after {tag} tag`
pub fn staleness_warning(node: &Node) -> Option<String> {
    let staleness = node.staleness?;
    let tag = node.tag.as_deref()?;
    Some(format!(
        "⚠️ {} commits after {} tag",
        staleness.commits_since_publish, tag
    ))
}
