//! Splicing a rendered diagram into a documentation file.
//!
//! The diagram lives between a fixed pair of HTML comment markers, so
//! re-running the job replaces the previous block instead of adding a new
//! one.

pub const BEGIN_MARKER: &str = "<!-- topograph:begin -->";
pub const END_MARKER: &str = "<!-- topograph:end -->";

/// Heading of the section the diagram belongs to
pub const ARCHITECTURE_HEADING: &str = "## Architecture";

/// Markdown block for a diagram: provenance note plus fenced Mermaid
pub fn diagram_block(source_file: &str, diagram: &str) -> String {
    format!(
        "> *Auto-generated from `{}` — click any node to jump to its definition in the source.*\n\n```mermaid\n{}\n```",
        source_file, diagram
    )
}

/// Replace whatever sits between the markers with `block`.
///
/// When the markers are missing (or out of order), the body of an existing
/// `## Architecture` section is replaced by the marked block; without such a
/// section one is appended. Content outside the markers (or outside that
/// section) is left byte-for-byte intact.
pub fn embed_between_markers(document: &str, block: &str) -> String {
    let wrapped = format!("{}\n{}\n{}", BEGIN_MARKER, block, END_MARKER);

    if let Some(begin) = document.find(BEGIN_MARKER) {
        let search_from = begin + BEGIN_MARKER.len();
        if let Some(offset) = document[search_from..].find(END_MARKER) {
            let end = search_from + offset + END_MARKER.len();
            return format!("{}{}{}", &document[..begin], wrapped, &document[end..]);
        }
    }

    if let Some((start, end)) = architecture_section(document) {
        let mut out = document[..start].to_string();
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&wrapped);
        out.push('\n');
        if end < document.len() {
            out.push('\n');
            out.push_str(&document[end..]);
        }
        return out;
    }

    let mut out = document.to_string();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(ARCHITECTURE_HEADING);
    out.push_str("\n\n");
    out.push_str(&wrapped);
    out.push('\n');
    out
}

/// Byte range of the first `## Architecture` section's body: from the end of
/// the heading line to the next `#`/`##` heading or the end of the document.
fn architecture_section(document: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    let mut body_start = None;
    for line in document.split_inclusive('\n') {
        let heading = line.trim_end();
        match body_start {
            None if heading == ARCHITECTURE_HEADING => body_start = Some(offset + line.len()),
            Some(start) if heading.starts_with("## ") || heading.starts_with("# ") => {
                return Some((start, offset));
            }
            _ => {}
        }
        offset += line.len();
    }
    body_start.map(|start| (start, document.len()))
}
