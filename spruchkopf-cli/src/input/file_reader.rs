//! File reading utilities

use super::glob_resolver::STDIN_MARKER;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// A loaded input with the name used in output records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDocument {
    /// Path as given, or `<stdin>`
    pub name: String,
    /// Full text
    pub text: String,
}

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read all of standard input
    pub fn read_stdin() -> Result<String> {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        Ok(content)
    }

    /// Read a resolved input; `-` reads standard input
    pub fn read_input(path: &Path) -> Result<InputDocument> {
        if path == Path::new(STDIN_MARKER) {
            return Ok(InputDocument {
                name: "<stdin>".to_string(),
                text: Self::read_stdin()?,
            });
        }

        Ok(InputDocument {
            name: path.display().to_string(),
            text: Self::read_text(path)?,
        })
    }
}
