//! Writing the segment document.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use sgen_core::SegmentCollection;

/// Where the JSON document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    File(PathBuf),
}

impl Sink {
    pub fn from_output(output: Option<&Path>) -> Self {
        output.map_or(Self::Stdout, |path| Self::File(path.to_path_buf()))
    }

    /// Writes the document to the file, or to `stdout` when no file was
    /// given.
    pub fn emit<W: Write>(&self, segments: &SegmentCollection, stdout: &mut W) -> Result<()> {
        let document = render(segments)?;
        match self {
            Self::Stdout => stdout
                .write_all(document.as_bytes())
                .context("failed to write segments to stdout"),
            Self::File(path) => std::fs::write(path, document)
                .with_context(|| format!("failed to write {}", path.display())),
        }
    }
}

/// Pretty-printed `{"segments": [...]}` followed by a newline.
pub fn render(segments: &SegmentCollection) -> Result<String> {
    let mut document = serde_json::to_string_pretty(&segments.as_document())
        .context("failed to serialize segments")?;
    document.push('\n');
    Ok(document)
}
