//! Node enrichment: image/tag, repository URL and staleness.
//!
//! Everything here is pure. Values that come from outside the process
//! (registry publish dates, commit counts, repository overrides) are passed
//! in through [`MetadataInputs`]; anything missing simply leaves the
//! corresponding field unset.

pub mod image;
pub mod repo_url;
pub mod staleness;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{Graph, Node};

pub use image::{resolve_image_metadata, split_image_ref, DEFAULT_TAG};
pub use repo_url::{infer_repo_url, RegistryMapping, RepoUrlResolver};
pub use staleness::{annotate_staleness, staleness_warning};

/// Property path holding the container image in `rad app graph` output
pub const IMAGE_PROPERTY_PATH: &[&str] = &["container", "image"];
/// Flat image property used by hand-written record sets
pub const FLAT_IMAGE_PROPERTY: &str = "image";
/// Explicit repository URL property
pub const REPOSITORY_URL_PROPERTY: &str = "repositoryUrl";

/// Externally resolved facts about one node; each may be absent.
///
/// Publish date and commit count describe one specific image tag, named by
/// `tag`. They are only applied to a node whose resolved tag equals it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMetadata {
    /// Tag the publish date and commit count were looked up for
    #[serde(default)]
    pub tag: Option<String>,
    /// When the referenced tag was published to the registry
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Commits on the source repository since `published_at`
    #[serde(default)]
    pub commits_since_publish: Option<u32>,
    /// Repository URL override; beats both the property and inference
    #[serde(default)]
    pub repository_url: Option<String>,
}

/// Resolved facts keyed by node id
pub type MetadataInputs = BTreeMap<String, ResolvedMetadata>;

/// Applies the enrichment pipeline node by node.
#[derive(Debug, Clone, Default)]
pub struct MetadataResolver {
    repo_urls: RepoUrlResolver,
}

impl MetadataResolver {
    pub fn new(repo_urls: RepoUrlResolver) -> Self {
        Self { repo_urls }
    }

    /// Raw image string from the node's properties, if any
    pub fn raw_image(node: &Node) -> Option<&str> {
        node.properties
            .lookup_str(IMAGE_PROPERTY_PATH)
            .or_else(|| node.properties.lookup_str(&[FLAT_IMAGE_PROPERTY]))
    }

    /// Enrich one node. Order: image/tag, repository URL, staleness.
    ///
    /// Staleness inputs resolved for a different tag than the node's (or
    /// for no tag at all) are ignored.
    pub fn resolve_node(&self, node: &Node, input: Option<&ResolvedMetadata>) -> Node {
        let resolved = resolve_image_metadata(node, Self::raw_image(node));

        let explicit = input
            .and_then(|i| i.repository_url.as_deref())
            .or_else(|| resolved.properties.lookup_str(&[REPOSITORY_URL_PROPERTY]));
        let repo_url = self.repo_urls.infer(resolved.image.as_deref(), explicit);
        let resolved = resolved.with_repo_url(repo_url);

        let publish = input.filter(|i| {
            i.tag.is_some() && i.tag.as_deref() == resolved.tag.as_deref()
        });
        annotate_staleness(
            &resolved,
            publish.and_then(|i| i.published_at),
            publish.and_then(|i| i.commits_since_publish),
        )
    }

    /// Enrich every node of `graph`, returning a new graph
    pub fn resolve_graph(&self, graph: &Graph, inputs: &MetadataInputs) -> Graph {
        graph.map_nodes(|node| self.resolve_node(node, inputs.get(&node.id)))
    }
}

/// Enrich a graph with the default registry mapping table
pub fn resolve_graph_metadata(graph: &Graph, inputs: &MetadataInputs) -> Graph {
    MetadataResolver::default().resolve_graph(graph, inputs)
}
