//! Render command
//!
//! Usage: topograph render --graph <JSON> [--metadata <JSON>] [--readme <MD>] [--output <FILE>]

use clap::Args;
use std::path::PathBuf;
use topograph_core::links::LinkContext;
use topograph_core::metadata::resolve_graph_metadata;
use topograph_core::render::document::{diagram_block, embed_between_markers};
use topograph_core::render::{render, RenderOptions};
use topograph_core::snapshot::load_snapshot;

use super::{emit, load_metadata, read_file, write_file, RepoArgs};

/// Source file assumed when the snapshot names none
const FALLBACK_SOURCE_FILE: &str = "app.bicep";

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// `rad app graph` JSON output to render
    #[arg(long, env = "RAD_GRAPH_OUTPUT")]
    pub graph: PathBuf,

    /// Externally resolved metadata keyed by node id
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    /// README to update in place between the topograph markers
    #[arg(long)]
    pub readme: Option<PathBuf>,

    /// Output file for the bare diagram (default: stdout unless --readme)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Branch the source links point at
    #[arg(long, env = "REPO_BRANCH", default_value = "main")]
    pub branch: String,

    #[command(flatten)]
    pub repo: RepoArgs,
}

/// Execute render command
pub fn execute(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(&read_file(&args.graph)?)?;
    let inputs = load_metadata(args.metadata.as_deref())?;
    let graph = resolve_graph_metadata(&snapshot.graph, &inputs);

    let source_file = snapshot
        .source_file
        .unwrap_or_else(|| FALLBACK_SOURCE_FILE.to_string());
    let links = LinkContext::blob(&args.repo.owner, &args.repo.repo, &args.branch)
        .with_default_file(source_file.clone());
    let options = RenderOptions::new(links).with_detailed(args.repo.detailed);

    let diagram = render(&graph, &options);

    if let Some(readme) = &args.readme {
        let current = read_file(readme)?;
        let updated = embed_between_markers(&current, &diagram_block(&source_file, &diagram));
        if updated == current {
            eprintln!("✓ {} already up to date", readme.display());
        } else {
            write_file(readme, &updated)?;
            eprintln!("✓ Updated {}", readme.display());
        }
    }

    if args.output.is_some() || args.readme.is_none() {
        emit(args.output.as_deref(), &format!("{}\n", diagram))?;
    }

    Ok(())
}
