//! Reader for the `rad app graph` JSON document.
//!
//! The document carries resources keyed by long resource ids and
//! connections whose endpoints may be ids, ARM `reference()` expressions,
//! service URLs or bare names. This module reduces all of that to a
//! [`RecordSet`] keyed by declared resource name.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeSet;
use std::time::Instant;

use crate::errors::{Result, TopographError};
use crate::model::{ConnectionRecord, Properties, RecordSet, ResourceRecord};
use crate::{log_op_end, log_op_error, log_op_start};

/// Connection type that only ties a resource to its application
pub const DEPENDS_ON: &str = "dependsOn";

/// Treat an explicit JSON `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    metadata: RawMetadata,
    #[serde(default, deserialize_with = "null_as_default")]
    resources: Vec<RawResource>,
    #[serde(default, deserialize_with = "null_as_default")]
    connections: Vec<RawConnection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    source_files: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResource {
    #[serde(default, deserialize_with = "null_as_default")]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    type_string: String,
    #[serde(default, deserialize_with = "null_as_default")]
    source_location: RawLocation,
    #[serde(default, deserialize_with = "null_as_default")]
    properties: Value,
}

#[derive(Debug, Default, Deserialize)]
struct RawLocation {
    #[serde(default, deserialize_with = "null_as_default")]
    file: String,
    #[serde(default, deserialize_with = "null_as_default")]
    line: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConnection {
    #[serde(default, deserialize_with = "null_as_default")]
    source_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    target_id: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    connection_type: String,
}

/// Resource id → declared name, in document order
struct NameIndex {
    entries: Vec<(String, String)>,
}

impl NameIndex {
    fn exact(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(rid, _)| !rid.is_empty() && rid == id)
            .map(|(_, name)| name.as_str())
    }

    fn by_name(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, n)| n == name)
            .map(|(_, n)| n.as_str())
    }

    /// Match on the last path segment of a resource id, or on the name
    fn by_last_segment(&self, reference: &str) -> Option<&str> {
        let last = last_segment(reference);
        if last.is_empty() {
            return None;
        }
        let suffix = format!("/{}", last);
        self.entries
            .iter()
            .find(|(rid, name)| rid.ends_with(&suffix) || name == last)
            .map(|(_, name)| name.as_str())
    }

    fn resolve_source(&self, reference: &str) -> Option<&str> {
        self.exact(reference)
            .or_else(|| self.by_last_segment(reference))
    }

    /// Target resolution order: exact id, ARM reference, URL host, last
    /// path segment.
    fn resolve_target(&self, reference: &str) -> Option<&str> {
        if let Some(name) = self.exact(reference) {
            return Some(name);
        }
        if let Some(symbol) = arm_reference_symbol(reference) {
            if let Some(name) = self.by_name(symbol) {
                return Some(name);
            }
        }
        if let Some(host) = url_host(reference) {
            if let Some(name) = self.by_name(host) {
                return Some(name);
            }
        }
        self.by_last_segment(reference)
    }
}

fn last_segment(reference: &str) -> &str {
    reference
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(reference)
}

/// `[reference('database').id]` → `database`
pub fn arm_reference_symbol(expr: &str) -> Option<&str> {
    let rest = expr.strip_prefix("[reference('")?;
    let end = rest.find('\'')?;
    let symbol = &rest[..end];
    let valid = !symbol.is_empty()
        && symbol
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_');
    valid.then_some(symbol)
}

/// `http://backend:3000/api` → `backend`
pub fn url_host(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))?;
    let end = rest.find([':', '/']).unwrap_or(rest.len());
    let host = &rest[..end];
    (!host.is_empty()).then_some(host)
}

/// Drop any non-JSON preamble (status lines) before the first `{`
fn strip_preamble(raw: &str) -> Result<&str> {
    raw.find('{')
        .map(|start| &raw[start..])
        .ok_or_else(|| TopographError::InvalidSnapshot {
            reason: "no JSON object found in graph output".to_string(),
        })
}

/// Parse `rad app graph` output into normalized records.
///
/// - a non-JSON prefix before the first `{` is skipped
/// - `metadata.sourceFiles[0]` (or the first resource's file) becomes the
///   record set's default source file
/// - `dependsOn` connections are skipped
/// - connections whose endpoints cannot be resolved, and self-loops, are
///   dropped with a warning; repeated connections collapse
///
/// # Errors
///
/// - `InvalidSnapshot`: no JSON object, or the JSON does not parse
/// - `MissingField`: a resource has no `name`
pub fn parse_rad_graph(raw: &str) -> Result<RecordSet> {
    let start = Instant::now();
    log_op_start!("parse_rad_graph", bytes = raw.len());

    match parse_rad_graph_inner(raw) {
        Ok(records) => {
            log_op_end!(
                "parse_rad_graph",
                duration_ms = start.elapsed().as_millis() as u64,
                node_count = records.resources.len(),
                edge_count = records.connections.len()
            );
            Ok(records)
        }
        Err(err) => {
            log_op_error!(
                "parse_rad_graph",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn parse_rad_graph_inner(raw: &str) -> Result<RecordSet> {
    let json = strip_preamble(raw)?;
    let skipped = raw.len() - json.len();
    if skipped > 0 {
        tracing::debug!(skipped_bytes = skipped, "skipping non-JSON prefix");
    }

    let document: RawDocument =
        serde_json::from_str(json).map_err(|e| TopographError::InvalidSnapshot {
            reason: e.to_string(),
        })?;

    let mut source_file = document.metadata.source_files.first().cloned();
    let mut resources = Vec::with_capacity(document.resources.len());
    let mut entries = Vec::with_capacity(document.resources.len());

    for (index, res) in document.resources.into_iter().enumerate() {
        let name = match res.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(TopographError::MissingField {
                    index,
                    field: "name".to_string(),
                })
            }
        };
        if source_file.is_none() && !res.source_location.file.is_empty() {
            source_file = Some(res.source_location.file.clone());
        }
        entries.push((res.id, name.clone()));
        resources.push(
            ResourceRecord::new(
                name,
                res.type_string,
                res.source_location.file,
                res.source_location.line,
            )
            .with_properties(Properties::from_value(res.properties)),
        );
    }

    let index = NameIndex { entries };
    let mut connections = Vec::new();
    let mut seen = BTreeSet::new();

    for conn in document.connections {
        if conn.connection_type == DEPENDS_ON {
            continue;
        }
        let from = index.resolve_source(&conn.source_id);
        let to = index.resolve_target(&conn.target_id);
        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                tracing::warn!(
                    source_id = %conn.source_id,
                    target_id = %conn.target_id,
                    "dropping connection with unresolvable endpoint"
                );
                continue;
            }
        };
        if from == to {
            tracing::warn!(node_id = %from, "dropping self-referencing connection");
            continue;
        }
        if seen.insert((from.to_string(), to.to_string())) {
            connections.push(ConnectionRecord::new(from, to));
        }
    }

    Ok(RecordSet {
        resources,
        connections,
        source_file,
    })
}
