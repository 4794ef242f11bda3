//! Normalized input records.
//!
//! These are the shapes the graph tool's output is reduced to before a
//! [`Graph`](crate::model::Graph) is built. They deserialize from camelCase
//! JSON so a record set can also be stored as a snapshot directly.

use serde::{Deserialize, Serialize};

use super::properties::Properties;

/// One resource as declared in the IaC document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    /// Declared name; becomes the node id
    pub id: String,
    pub display_name: String,
    /// Resource type, e.g. `Applications.Core/containers`
    pub type_string: String,
    #[serde(default)]
    pub source_file: String,
    #[serde(default)]
    pub source_line: u32,
    #[serde(default)]
    pub properties: Properties,
}

impl ResourceRecord {
    /// Record whose display name equals its id and which has no properties
    pub fn new(
        id: impl Into<String>,
        type_string: impl Into<String>,
        source_file: impl Into<String>,
        source_line: u32,
    ) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            type_string: type_string.into(),
            source_file: source_file.into(),
            source_line,
            properties: Properties::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }
}

/// A `from → to` connection between two declared resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub from: String,
    pub to: String,
}

impl ConnectionRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A full record set: what one snapshot file normalizes to
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordSet {
    pub resources: Vec<ResourceRecord>,
    pub connections: Vec<ConnectionRecord>,
    /// Default source file for resources that do not name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}
