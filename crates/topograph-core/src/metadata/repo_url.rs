//! Source-repository inference from container image references.

/// One registry host whose `host/org/name` images live at `source_host/org/name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryMapping {
    pub registry_host: String,
    pub source_host: String,
}

impl RegistryMapping {
    pub fn new(registry_host: impl Into<String>, source_host: impl Into<String>) -> Self {
        Self {
            registry_host: registry_host.into(),
            source_host: source_host.into(),
        }
    }
}

/// Registry-to-source-host table.
///
/// The default table knows `ghcr.io` → `https://github.com`; callers extend
/// it with [`RepoUrlResolver::with_mapping`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrlResolver {
    mappings: Vec<RegistryMapping>,
}

impl Default for RepoUrlResolver {
    fn default() -> Self {
        Self {
            mappings: vec![RegistryMapping::new("ghcr.io", "https://github.com")],
        }
    }
}

impl RepoUrlResolver {
    /// Resolver with exactly the given mappings
    pub fn new(mappings: Vec<RegistryMapping>) -> Self {
        Self { mappings }
    }

    pub fn with_mapping(
        mut self,
        registry_host: impl Into<String>,
        source_host: impl Into<String>,
    ) -> Self {
        self.mappings
            .push(RegistryMapping::new(registry_host, source_host));
        self
    }

    pub fn mappings(&self) -> &[RegistryMapping] {
        &self.mappings
    }

    /// Infer the repository URL for `image`.
    ///
    /// A non-blank `explicit` URL is returned verbatim. Otherwise the image
    /// must be exactly `host/org/name` with a mapped host; anything else
    /// (tags, digests, extra or empty path segments, unknown hosts) is `None`.
    pub fn infer(&self, image: Option<&str>, explicit: Option<&str>) -> Option<String> {
        if let Some(url) = explicit.filter(|u| !u.trim().is_empty()) {
            return Some(url.to_string());
        }
        let image = image?;
        if image.contains([':', '@']) || image.chars().any(char::is_whitespace) {
            return None;
        }

        let segments: Vec<&str> = image.split('/').collect();
        let [host, org, name] = segments.as_slice() else {
            return None;
        };
        if org.is_empty() || name.is_empty() {
            return None;
        }

        self.mappings
            .iter()
            .find(|m| m.registry_host.eq_ignore_ascii_case(host))
            .map(|m| format!("{}/{}/{}", m.source_host.trim_end_matches('/'), org, name))
    }
}

/// Infer a repository URL with the default mapping table
pub fn infer_repo_url(image: &str, explicit: Option<&str>) -> Option<String> {
    RepoUrlResolver::default().infer(Some(image), explicit)
}
