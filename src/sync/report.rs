use super::update::UpdateResult;
use super::Mode;
use crate::error::{SnippetError, SnippetErrors};
use crate::snippet::Position;
use serde::Serialize;
use std::path::PathBuf;

/// Everything one [`compare`](super::compare) run found and did.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub mode: Mode,
    pub files_scanned: usize,
    pub snippets_checked: usize,
    /// Structural, unknown-name, mismatch and write errors, in discovery order
    pub errors: Vec<SnippetError>,
    /// Files with at least one content mismatch
    pub mismatched_files: Vec<PathBuf>,
    /// Apply mode only
    pub updates: Vec<UpdateResult>,
}

/// One error flattened for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub kind: &'static str,
    pub file: Option<PathBuf>,
    pub line: Option<usize>,
    /// Second marker the error cites, possibly in another file
    pub related: Option<Position>,
    pub message: String,
}

impl From<&SnippetError> for ReportEntry {
    fn from(error: &SnippetError) -> Self {
        Self {
            kind: error.kind(),
            file: error.file().map(|f| f.to_path_buf()),
            line: error.position().map(|p| p.line),
            related: error.related_position().cloned(),
            message: error.to_string(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    mode: Mode,
    clean: bool,
    files_scanned: usize,
    snippets_checked: usize,
    errors: Vec<ReportEntry>,
    updates: &'a [UpdateResult],
}

impl SyncReport {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Files that were actually rewritten.
    pub fn rewritten(&self) -> impl Iterator<Item = &UpdateResult> {
        self.updates
            .iter()
            .filter(|u| matches!(u, UpdateResult::Applied { .. }))
    }

    pub fn count(&self, kind: &str) -> usize {
        self.errors.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn entries(&self) -> Vec<ReportEntry> {
        self.errors.iter().map(ReportEntry::from).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&JsonReport {
            mode: self.mode,
            clean: self.is_clean(),
            files_scanned: self.files_scanned,
            snippets_checked: self.snippets_checked,
            errors: self.entries(),
            updates: &self.updates,
        })
    }

    /// Collapse the report into its accumulated errors.
    pub fn into_result(self) -> Result<(), SnippetErrors> {
        SnippetErrors::from(self.errors).into_result()
    }
}
