//! Digest command
//!
//! Usage: topograph digest --graph <JSON>
//!
//! Prints the structural digest so a job can skip committing an unchanged
//! snapshot.

use clap::Args;
use std::path::PathBuf;
use topograph_core::snapshot::{graph_digest, load_snapshot};

use super::read_file;

#[derive(Debug, Args)]
pub struct DigestArgs {
    /// `rad app graph` JSON output to digest
    #[arg(long)]
    pub graph: PathBuf,
}

/// Execute digest command
pub fn execute(args: DigestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(&read_file(&args.graph)?)?;
    println!("{}", graph_digest(&snapshot.graph)?);
    Ok(())
}
