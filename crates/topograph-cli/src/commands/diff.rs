//! Diff command
//!
//! Usage: topograph diff --base <JSON> --head <JSON> --pr <N> [--metadata <JSON>] [--output <FILE>]
//!
//! A missing snapshot is treated as an empty graph; when both are missing
//! the "no architecture changes" comment is produced.

use clap::Args;
use std::path::{Path, PathBuf};
use topograph_core::diff::compute_diff;
use topograph_core::links::{DiffSide, LinkContext};
use topograph_core::metadata::resolve_graph_metadata;
use topograph_core::model::Graph;
use topograph_core::render::comment::{
    app_label, render_comment, render_no_changes, render_section, SNAPSHOT_SUFFIX,
};
use topograph_core::render::RenderOptions;
use topograph_core::snapshot::load_snapshot;

use super::{emit, load_metadata, read_optional, RepoArgs};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Baseline snapshot (the target branch's committed graph)
    #[arg(long)]
    pub base: PathBuf,

    /// Head snapshot (the PR's freshly generated graph)
    #[arg(long, env = "HEAD_GRAPH")]
    pub head: PathBuf,

    /// Pull request number the file-diff links point into
    #[arg(long, env = "PR_NUMBER")]
    pub pr: u64,

    /// Externally resolved metadata keyed by node id
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    /// Section heading (default: the app directory of whichever snapshot
    /// path ends in `.radius/app-graph.json`, else `(root)`)
    #[arg(long)]
    pub label: Option<String>,

    /// Output file for the comment (default: stdout)
    #[arg(short, long, env = "DIFF_OUTPUT")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub repo: RepoArgs,
}

/// Section label from the snapshot paths.
///
/// The baseline is usually a scratch file written from `git show`, so the
/// head path is preferred. A path that is not a committed snapshot location
/// says nothing about the app and yields `(root)`.
fn default_label(base: &Path, head: &Path) -> String {
    [head, base]
        .into_iter()
        .map(|p| p.to_string_lossy().into_owned())
        .find(|p| p.ends_with(SNAPSHOT_SUFFIX))
        .map(|p| app_label(&p))
        .unwrap_or_else(|| app_label(""))
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let base_raw = read_optional(&args.base)?;
    let head_raw = read_optional(&args.head)?;

    if base_raw.is_none() && head_raw.is_none() {
        emit(args.output.as_deref(), &render_no_changes())?;
        return Ok(());
    }

    let inputs = load_metadata(args.metadata.as_deref())?;
    let mut default_file = String::new();
    let mut load = |raw: Option<String>| -> Result<Graph, Box<dyn std::error::Error>> {
        let Some(raw) = raw else {
            return Ok(Graph::empty());
        };
        let snapshot = load_snapshot(&raw)?;
        if let Some(file) = snapshot.source_file {
            default_file = file;
        }
        Ok(resolve_graph_metadata(&snapshot.graph, &inputs))
    };
    let baseline = load(base_raw)?;
    let head = load(head_raw)?;

    let diff = compute_diff(&baseline, &head);
    tracing::info!(
        has_changes = diff.has_changes(),
        added = diff.counts().added,
        removed = diff.counts().removed,
        modified = diff.counts().modified,
        "diff computed"
    );

    let links = LinkContext::pull_request(&args.repo.owner, &args.repo.repo, args.pr, DiffSide::Right)
        .with_default_file(default_file);
    let options = RenderOptions::new(links).with_detailed(args.repo.detailed);

    let label = args
        .label
        .unwrap_or_else(|| default_label(&args.base, &args.head));
    let section = render_section(&label, &diff, &options);

    emit(args.output.as_deref(), &render_comment(&[section]))?;
    Ok(())
}
