//! Subcommands and the file handling they share

pub mod diff;
pub mod digest;
pub mod render;

use clap::Args;
use std::path::Path;
use topograph_core::errors::TopographError;
use topograph_core::metadata::MetadataInputs;

/// Repository coordinates used to build deep links
#[derive(Debug, Args)]
pub struct RepoArgs {
    /// Repository owner
    #[arg(long, env = "REPO_OWNER")]
    pub owner: String,

    /// Repository name
    #[arg(long, env = "REPO_NAME")]
    pub repo: String,

    /// Show image:tag and staleness lines in node labels
    #[arg(
        long,
        env = "DETAILED",
        default_value = "false",
        num_args = 0..=1,
        default_missing_value = "true",
        action = clap::ArgAction::Set,
        value_parser = parse_detailed
    )]
    pub detailed: bool,
}

/// `true`, `1` and `yes` (any case) enable detailed mode; anything else
/// disables it.
pub fn parse_detailed(value: &str) -> Result<bool, String> {
    Ok(matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    ))
}

pub fn read_file(path: &Path) -> Result<String, TopographError> {
    std::fs::read_to_string(path).map_err(|e| TopographError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Read a snapshot that may legitimately be absent
pub fn read_optional(path: &Path) -> Result<Option<String>, TopographError> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "snapshot not found, treating as empty");
        return Ok(None);
    }
    read_file(path).map(Some)
}

pub fn write_file(path: &Path, contents: &str) -> Result<(), TopographError> {
    std::fs::write(path, contents).map_err(|e| TopographError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load a `MetadataInputs` JSON file, or an empty map when none is given
pub fn load_metadata(path: Option<&Path>) -> Result<MetadataInputs, TopographError> {
    match path {
        Some(path) => {
            let raw = read_file(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(MetadataInputs::new()),
    }
}

/// Print to stdout or write to `output`
pub fn emit(output: Option<&Path>, text: &str) -> Result<(), TopographError> {
    match output {
        Some(path) => {
            write_file(path, text)?;
            eprintln!("✓ Wrote {}", path.display());
            Ok(())
        }
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}
