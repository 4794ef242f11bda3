//! Topograph CLI
//!
//! Command-line interface for rendering and diffing application graphs

use clap::{Parser, Subcommand};
use topograph_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "topograph")]
#[command(about = "Topograph - Architecture diagrams and PR diffs for IaC applications", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a graph snapshot as a Mermaid diagram (optionally into a README)
    Render(commands::render::RenderArgs),
    /// Compare two graph snapshots and produce a PR comment
    Diff(commands::diff::DiffArgs),
    /// Print the structural digest of a graph snapshot
    Digest(commands::digest::DigestArgs),
}

fn main() {
    init(Profile::from_env_value(
        std::env::var("TOPOGRAPH_LOG").ok().as_deref(),
    ));

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render(args) => commands::render::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Digest(args) => commands::digest::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
