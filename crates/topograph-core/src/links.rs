//! Deep links from diagram nodes back to source lines.
//!
//! Two schemes: a blob link to a line on a branch (architecture diagram),
//! and a pull-request file-diff anchor (PR comment). Both are pure string
//! construction.

use sha2::{Digest, Sha256};

use crate::model::Node;

/// Base URL of the source-hosting platform
pub const HOST_BASE_URL: &str = "https://github.com";

/// Which side of a file diff an anchor points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffSide {
    /// Baseline (left) side; used for removed resources
    Left,
    /// Head (right) side
    Right,
}

impl DiffSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffSide::Left => "L",
            DiffSide::Right => "R",
        }
    }
}

/// `https://github.com/{owner}/{repo}/blob/{branch}/{file}#L{line}`
pub fn blob_link(owner: &str, repo: &str, branch: &str, file: &str, line: u32) -> String {
    format!(
        "{}/{}/{}/blob/{}/{}#L{}",
        HOST_BASE_URL, owner, repo, branch, file, line
    )
}

/// `https://github.com/{owner}/{repo}/pull/{pr}/files#diff-{hash}{side}{line}`
pub fn diff_link(
    owner: &str,
    repo: &str,
    pr_number: u64,
    file_path_hash: &str,
    side: DiffSide,
    line: u32,
) -> String {
    format!(
        "{}/{}/{}/pull/{}/files#diff-{}{}{}",
        HOST_BASE_URL,
        owner,
        repo,
        pr_number,
        file_path_hash,
        side.as_str(),
        line
    )
}

/// Anchor hash the platform uses for a file in a PR's "Files changed" view:
/// lowercase hex SHA-256 of the repository-relative path.
pub fn file_path_hash(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    hex::encode(hasher.finalize())
}

/// `"{display_name} — {file} line {line}"`
pub fn tooltip(display_name: &str, file: &str, line: u32) -> String {
    format!("{} — {} line {}", display_name, file, line)
}

/// How links are built for one rendering call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkScheme {
    Blob { branch: String },
    PullRequest { pr_number: u64, side: DiffSide },
}

/// Repository coordinates plus the link scheme for one rendering call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkContext {
    pub owner: String,
    pub repo: String,
    pub scheme: LinkScheme,
    /// Used for nodes whose record names no source file
    pub default_file: String,
}

/// A resolved link for one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLink {
    pub url: String,
    pub tooltip: String,
}

impl LinkContext {
    pub fn blob(owner: impl Into<String>, repo: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            scheme: LinkScheme::Blob {
                branch: branch.into(),
            },
            default_file: String::new(),
        }
    }

    pub fn pull_request(
        owner: impl Into<String>,
        repo: impl Into<String>,
        pr_number: u64,
        side: DiffSide,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            scheme: LinkScheme::PullRequest { pr_number, side },
            default_file: String::new(),
        }
    }

    pub fn with_default_file(mut self, file: impl Into<String>) -> Self {
        self.default_file = file.into();
        self
    }

    /// Same context, anchored to `side` (no effect on blob links)
    pub fn with_side(&self, side: DiffSide) -> Self {
        let mut ctx = self.clone();
        if let LinkScheme::PullRequest { side: s, .. } = &mut ctx.scheme {
            *s = side;
        }
        ctx
    }

    fn file_for<'a>(&'a self, node: &'a Node) -> &'a str {
        if node.source_file.is_empty() {
            &self.default_file
        } else {
            &node.source_file
        }
    }

    /// Link and tooltip for `node`
    pub fn node_link(&self, node: &Node) -> NodeLink {
        let file = self.file_for(node);
        let url = match &self.scheme {
            LinkScheme::Blob { branch } => {
                blob_link(&self.owner, &self.repo, branch, file, node.source_line)
            }
            LinkScheme::PullRequest { pr_number, side } => diff_link(
                &self.owner,
                &self.repo,
                *pr_number,
                &file_path_hash(file),
                *side,
                node.source_line,
            ),
        };
        NodeLink {
            url,
            tooltip: tooltip(&node.display_name, file, node.source_line),
        }
    }
}
