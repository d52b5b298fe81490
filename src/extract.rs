//! Collecting snippets from a file or a whole directory tree.

use crate::discover::{discover, FileFilter};
use crate::error::SnippetError;
use crate::marker::MarkerSyntax;
use crate::snippet::{parse_file, Snippet};
use std::path::Path;

/// Snippets from every file that parsed, plus the errors of those that did not.
#[derive(Debug, Default)]
pub struct Extraction {
    pub snippets: Vec<Snippet>,
    pub errors: Vec<SnippetError>,
    pub files: usize,
}

impl Extraction {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse `path`, walking it when it is a directory.
///
/// A single file's structural error does not stop the walk; it is recorded in
/// [`Extraction::errors`]. Only a missing path or a failed walk is fatal.
pub fn get(
    path: &Path,
    syntax: &MarkerSyntax,
    filter: &FileFilter,
) -> Result<Extraction, SnippetError> {
    let files = discover(&[path], filter)?;
    let mut extraction = Extraction::default();
    for file in &files {
        extraction.files += 1;
        match parse_file(file, syntax) {
            Ok(snippets) => extraction.snippets.extend(snippets),
            Err(err) => {
                tracing::debug!(file = %file.display(), error = %err, "skipping file");
                extraction.errors.push(err);
            }
        }
    }
    Ok(extraction)
}
