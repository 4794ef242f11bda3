//! Shared fixtures for topograph-core integration tests

use serde_json::json;
use topograph_core::metadata::{resolve_graph_metadata, MetadataInputs};
use topograph_core::model::{build_graph, ConnectionRecord, Graph, Properties, ResourceRecord};

pub const CONTAINER: &str = "Applications.Core/containers";
pub const REDIS: &str = "Applications.Datastores/redisCaches";
pub const APPLICATION: &str = "Applications.Core/applications";

/// Container record with an explicit image
#[allow(dead_code)]
pub fn container(id: &str, line: u32, image: &str) -> ResourceRecord {
    ResourceRecord::new(id, CONTAINER, "app.bicep", line).with_properties(Properties::from_value(
        json!({ "container": { "image": image } }),
    ))
}

/// Datastore record
#[allow(dead_code)]
pub fn datastore(id: &str, line: u32) -> ResourceRecord {
    ResourceRecord::new(id, REDIS, "app.bicep", line)
}

#[allow(dead_code)]
pub fn conn(from: &str, to: &str) -> ConnectionRecord {
    ConnectionRecord::new(from, to)
}

/// Build and enrich a graph without external metadata
#[allow(dead_code)]
pub fn resolved(resources: &[ResourceRecord], connections: &[ConnectionRecord]) -> Graph {
    let graph = build_graph(resources, connections).unwrap();
    resolve_graph_metadata(&graph, &MetadataInputs::new())
}

/// `frontend → backend → database`, the baseline used across diff tests
#[allow(dead_code)]
pub fn shop_baseline() -> Graph {
    resolved(
        &[
            container("frontend", 10, "ghcr.io/acme/frontend:1.0"),
            container("backend", 20, "ghcr.io/acme/backend:1.0"),
            datastore("database", 30),
        ],
        &[conn("frontend", "backend"), conn("backend", "database")],
    )
}

/// A `rad app graph` document with a status-line preamble
#[allow(dead_code)]
pub const RAD_GRAPH_OUTPUT: &str = r#"Building app.bicep...
{
  "metadata": { "sourceFiles": ["app.bicep"] },
  "resources": [
    {
      "id": "/planes/radius/local/resourceGroups/default/providers/Applications.Core/applications/shop",
      "name": "shop",
      "type": "Applications.Core/applications",
      "sourceLocation": { "file": "app.bicep", "line": 3 }
    },
    {
      "id": "/planes/radius/local/resourceGroups/default/providers/Applications.Core/containers/frontend",
      "name": "frontend",
      "type": "Applications.Core/containers",
      "sourceLocation": { "file": "app.bicep", "line": 18 },
      "properties": {
        "container": { "image": "ghcr.io/acme/frontend:2.1" },
        "connections": { "backend": { "source": "http://backend:3000" } }
      }
    },
    {
      "id": "/planes/radius/local/resourceGroups/default/providers/Applications.Core/containers/backend",
      "name": "backend",
      "type": "Applications.Core/containers",
      "sourceLocation": { "line": 32 },
      "properties": {
        "container": { "image": "[parameters('backendImage')]" }
      }
    },
    {
      "id": "/planes/radius/local/resourceGroups/default/providers/Applications.Datastores/redisCaches/cache",
      "name": "cache",
      "type": "Applications.Datastores/redisCaches",
      "sourceLocation": { "file": "app.bicep", "line": 45 }
    }
  ],
  "connections": [
    { "sourceId": "/planes/radius/local/resourceGroups/default/providers/Applications.Core/containers/frontend", "targetId": "http://backend:3000", "type": "connection" },
    { "sourceId": "/planes/radius/local/resourceGroups/default/providers/Applications.Core/containers/backend", "targetId": "[reference('cache').id]", "type": "connection" },
    { "sourceId": "/planes/radius/local/resourceGroups/default/providers/Applications.Core/containers/frontend", "targetId": "shop", "type": "dependsOn" },
    { "sourceId": "/planes/radius/local/resourceGroups/default/providers/Applications.Core/containers/frontend", "targetId": "http://backend:3000", "type": "connection" },
    { "sourceId": "/planes/radius/local/resourceGroups/default/providers/Applications.Core/containers/backend", "targetId": "http://unknown-svc:80", "type": "connection" },
    { "sourceId": "/planes/radius/local/resourceGroups/default/providers/Applications.Core/containers/cache", "targetId": "cache", "type": "connection" }
  ]
}
"#;
