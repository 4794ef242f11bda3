//! Image and tag resolution for container nodes.

use crate::model::Node;

/// Tag assumed when an image reference carries none
pub const DEFAULT_TAG: &str = "latest";

/// Split an image reference on its **last** colon.
///
/// `"ghcr.io/x/y:1.2"` → `("ghcr.io/x/y", "1.2")`; no colon, or an empty
/// tag after the colon, yields [`DEFAULT_TAG`].
pub fn split_image_ref(raw: &str) -> (String, String) {
    match raw.rfind(':') {
        Some(idx) if idx + 1 < raw.len() => (raw[..idx].to_string(), raw[idx + 1..].to_string()),
        Some(idx) => (raw[..idx].to_string(), DEFAULT_TAG.to_string()),
        None => (raw.to_string(), DEFAULT_TAG.to_string()),
    }
}

/// Filter an image property down to something worth splitting.
///
/// Blank strings, strings with nothing before the last colon, and
/// unevaluated template expressions such as `[parameters('img')]` are
/// treated as absent.
pub fn usable_image_property(raw: Option<&str>) -> Option<&str> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.starts_with('[') || raw.starts_with(':') {
        return None;
    }
    Some(raw)
}

/// Return a copy of `node` with `image`/`tag` populated.
///
/// 1. Non-container nodes are returned without image metadata.
/// 2. A usable image property is split on its last colon.
/// 3. Otherwise the display name stands in for the image, tagged `latest`.
pub fn resolve_image_metadata(node: &Node, raw_image: Option<&str>) -> Node {
    let mut resolved = node.clone();
    if !node.is_container() {
        resolved.image = None;
        resolved.tag = None;
        return resolved;
    }

    let (image, tag) = match usable_image_property(raw_image) {
        Some(raw) => split_image_ref(raw),
        None => (node.display_name.clone(), DEFAULT_TAG.to_string()),
    };
    resolved.with_image(image, tag)
}
