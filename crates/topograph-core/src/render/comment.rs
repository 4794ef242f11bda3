//! Pull-request comment assembly.
//!
//! A comment is a header, one section per application, and a footer. A
//! section carries the side-by-side baseline/head diagrams, the diff
//! diagram, the change tables and a counts line.

use crate::diff::summary::{connections_table, counts_line, resources_table};
use crate::diff::DiffResult;
use crate::render::mermaid::{render_comparison, RenderOptions};

pub const COMMENT_HEADER: &str = "## 🏗️ Architecture Changes\n\n";
pub const COMMENT_FOOTER: &str = "\n---\n*Powered by [Radius](https://radapp.io/)*\n";

/// Default location of a committed snapshot, relative to an app directory
pub const SNAPSHOT_SUFFIX: &str = ".radius/app-graph.json";

/// Legend shown above the diff diagram
pub const LEGEND: &str = "🟢 Added  🟡 Modified  🔴 Removed";

/// Section label for a snapshot path: the application directory, or
/// `(root)` for a snapshot at the repository root.
pub fn app_label(snapshot_path: &str) -> String {
    let dir = snapshot_path
        .strip_suffix(SNAPSHOT_SUFFIX)
        .unwrap_or(snapshot_path)
        .trim_end_matches('/');
    if dir.is_empty() {
        "(root)".to_string()
    } else {
        dir.to_string()
    }
}

fn fenced(diagram: &str) -> String {
    format!("```mermaid\n{}\n```", diagram)
}

/// One application's section of the comment
pub fn render_section(label: &str, diff: &DiffResult, options: &RenderOptions) -> String {
    let mut lines = vec![format!("### 📦 `{}`\n", label)];

    if !diff.has_changes() {
        lines.push("> No resource or connection changes.\n".to_string());
        return lines.join("\n");
    }

    let diagrams = render_comparison(diff, options);

    lines.push("<table>".to_string());
    lines.push("<tr><th>📌 main</th><th>🔀 This PR</th></tr>".to_string());
    lines.push("<tr><td>\n".to_string());
    lines.push(fenced(&diagrams.baseline));
    lines.push("\n</td><td>\n".to_string());
    lines.push(fenced(&diagrams.head));
    lines.push("\n</td></tr>".to_string());
    lines.push("</table>\n".to_string());

    lines.push("#### Diff\n".to_string());
    lines.push(format!("{}\n", LEGEND));
    lines.push(format!("{}\n", fenced(&diagrams.diff)));

    if let Some(table) = resources_table(diff, &options.links) {
        lines.push(table);
    }
    if let Some(table) = connections_table(diff) {
        lines.push(table);
    }

    lines.push(format!("{}\n", counts_line(diff)));
    lines.join("\n")
}

/// Wrap rendered sections in the comment header and footer
pub fn render_comment(sections: &[String]) -> String {
    format!("{}{}{}", COMMENT_HEADER, sections.join("\n"), COMMENT_FOOTER)
}

/// Comment used when neither side has a snapshot
pub fn render_no_changes() -> String {
    format!(
        "{}> No architecture changes detected in this PR.\n{}",
        COMMENT_HEADER, COMMENT_FOOTER
    )
}
