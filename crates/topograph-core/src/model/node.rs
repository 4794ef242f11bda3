use serde::{Deserialize, Serialize};
use std::fmt;

use super::properties::Properties;
use super::records::ResourceRecord;

/// Resource category, derived from the resource type string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Container,
    Datastore,
    /// The top-level application resource; kept in the model, never drawn
    Application,
    Other,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Container => "container",
            NodeKind::Datastore => "datastore",
            NodeKind::Application => "application",
            NodeKind::Other => "other",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered (substring, kind) pairs; first match wins, matching is case-insensitive.
pub const KIND_TABLE: &[(&str, NodeKind)] = &[
    ("containers", NodeKind::Container),
    ("datastores", NodeKind::Datastore),
    ("rediscaches", NodeKind::Datastore),
    ("sqldatabases", NodeKind::Datastore),
    ("mongodatabases", NodeKind::Datastore),
];

/// Classify a resource type string into a [`NodeKind`]
///
/// Table entries are checked first. A type whose last path segment is
/// `applications` is the application resource. Everything else is `Other`.
pub fn classify_kind(type_string: &str) -> NodeKind {
    let lowered = type_string.to_ascii_lowercase();
    if let Some((_, kind)) = KIND_TABLE
        .iter()
        .find(|(pattern, _)| lowered.contains(pattern))
    {
        return *kind;
    }
    if lowered.rsplit('/').next() == Some("applications") {
        return NodeKind::Application;
    }
    NodeKind::Other
}

/// Staleness annotation: commits landed after the referenced tag was published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staleness {
    /// Always greater than zero; a zero count is never stored
    pub commits_since_publish: u32,
}

/// Node - one infrastructure resource in the topology graph
///
/// Nodes are values: every enrichment step returns a new node rather than
/// mutating one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Stable identifier (the resource's declared name)
    pub id: String,

    /// Human-readable name
    pub display_name: String,

    /// Category derived from the resource type
    pub kind: NodeKind,

    /// Raw resource type string the kind was derived from
    pub type_string: String,

    /// File the resource is defined in, relative to the repository root
    pub source_file: String,

    /// 1-based line of the definition
    pub source_line: u32,

    /// Image reference without tag (container nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Image tag (container nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Source repository inferred from the image or given explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inferred_repo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staleness: Option<Staleness>,

    /// Raw property bag; not part of diff classification
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

impl Node {
    /// Create a node with no resolved metadata
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        type_string: impl Into<String>,
        source_file: impl Into<String>,
        source_line: u32,
    ) -> Self {
        let type_string = type_string.into();
        Self {
            id: id.into(),
            display_name: display_name.into(),
            kind: classify_kind(&type_string),
            type_string,
            source_file: source_file.into(),
            source_line,
            image: None,
            tag: None,
            inferred_repo_url: None,
            staleness: None,
            properties: Properties::new(),
        }
    }

    /// Build a node from a normalized resource record
    pub fn from_record(record: &ResourceRecord) -> Self {
        Self::new(
            record.id.clone(),
            record.display_name.clone(),
            record.type_string.clone(),
            record.source_file.clone(),
            record.source_line,
        )
        .with_properties(record.properties.clone())
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>, tag: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self.tag = Some(tag.into());
        self
    }

    pub fn with_repo_url(mut self, url: Option<String>) -> Self {
        self.inferred_repo_url = url;
        self
    }

    pub fn with_staleness(mut self, staleness: Option<Staleness>) -> Self {
        self.staleness = staleness;
        self
    }

    pub fn is_container(&self) -> bool {
        self.kind == NodeKind::Container
    }

    /// Application resources are modelled but not drawn
    pub fn is_drawn(&self) -> bool {
        self.kind != NodeKind::Application
    }

    /// `image:tag` when both are resolved
    pub fn image_ref(&self) -> Option<String> {
        match (&self.image, &self.tag) {
            (Some(image), Some(tag)) => Some(format!("{}:{}", image, tag)),
            _ => None,
        }
    }

    /// Short type name: the last path segment of the type string
    pub fn short_type(&self) -> &str {
        self.type_string
            .rsplit('/')
            .next()
            .unwrap_or(&self.type_string)
    }
}
