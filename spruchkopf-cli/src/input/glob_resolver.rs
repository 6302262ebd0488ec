//! File pattern resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;

/// Input argument that stands for standard input
pub const STDIN_MARKER: &str = "-";

/// Resolve file patterns to actual file paths
///
/// `-` is passed through unchanged and read from standard input later.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stdin = false;

    for pattern in patterns {
        if pattern == STDIN_MARKER {
            stdin = true;
            continue;
        }

        let paths = glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;
        for path_result in paths {
            let path = path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;
            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() && !stdin {
        return Err(CliError::NoInput(patterns.join(", ")).into());
    }

    // Remove duplicates and sort
    files.sort();
    files.dedup();
    if stdin {
        files.insert(0, PathBuf::from(STDIN_MARKER));
    }

    log::debug!("Resolved {} input(s)", files.len());
    Ok(files)
}
