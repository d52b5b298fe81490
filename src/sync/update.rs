use super::reference::ReferenceSet;
use super::SyncOptions;
use crate::edit::{atomic_write, indentation, splice_lines, LineSplice};
use crate::error::SnippetError;
use crate::marker::MarkerSyntax;
use crate::snippet::{parse_str, read_source, Snippet};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome of [`update`] on one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
#[must_use = "UpdateResult should be checked for applied/already-synced"]
pub enum UpdateResult {
    /// The file was rewritten; `replaced` lists the snippet names that changed
    Applied { file: PathBuf, replaced: Vec<String> },
    /// Every snippet already matched its reference; nothing was written
    AlreadySynced { file: PathBuf },
}

impl UpdateResult {
    pub fn file(&self) -> &Path {
        match self {
            UpdateResult::Applied { file, .. } | UpdateResult::AlreadySynced { file } => file,
        }
    }
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateResult::Applied { file, replaced } => write!(
                f,
                "Updated {} ({})",
                file.display(),
                replaced.join(", ")
            ),
            UpdateResult::AlreadySynced { file } => {
                write!(f, "Already in sync: {}", file.display())
            }
        }
    }
}

/// Rewritten text of a file together with the snippet names that changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpdate {
    pub text: String,
    pub replaced: Vec<String>,
}

/// Replace the code of every snippet whose reference counterpart differs.
///
/// Snippets without a reference counterpart are left alone. Returns the
/// names that were replaced, in order.
pub fn sync_snippets(reference: &ReferenceSet, snippets: &mut [Snippet]) -> Vec<String> {
    let mut replaced = Vec::new();
    for snippet in snippets.iter_mut() {
        if let Some(expected) = reference.get(&snippet.name) {
            if expected.code != snippet.code {
                snippet.code = expected.code.clone();
                replaced.push(snippet.name.clone());
            }
        }
    }
    replaced
}

/// Compute the synchronized text of `file` without touching the disk.
///
/// Returns `None` when nothing would change. Lines outside snippet spans are
/// copied verbatim; each snippet span is re-rendered with the indentation of
/// its start marker.
pub fn plan_update(
    file: &Path,
    text: &str,
    reference: &ReferenceSet,
    syntax: &MarkerSyntax,
) -> Result<Option<PlannedUpdate>, SnippetError> {
    let mut snippets = parse_str(file, text, syntax)?;
    snippets.sort_by_key(|s| s.start.line);

    let replaced = sync_snippets(reference, &mut snippets);
    if replaced.is_empty() {
        return Ok(None);
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let splices: Vec<LineSplice> = snippets
        .iter()
        .map(|snippet| {
            let span = snippet.span();
            let indent = indentation(lines[span.start]);
            LineSplice::new(span, snippet.render(syntax, indent))
        })
        .collect();

    let text = splice_lines(&lines, &splices).map_err(|source| SnippetError::Splice {
        file: file.to_path_buf(),
        source,
    })?;
    Ok(Some(PlannedUpdate { text, replaced }))
}

/// Bring the snippets of `file` in line with `reference`, writing only when
/// something changed.
///
/// Before the write the rewritten text is piped through the configured
/// formatter if it handles the file's extension. A formatter failure is
/// logged and the unformatted text is written instead. No other file is
/// read or written.
pub fn update(
    file: &Path,
    reference: &ReferenceSet,
    options: &SyncOptions,
) -> Result<UpdateResult, SnippetError> {
    let source = read_source(file)?;
    let Some(PlannedUpdate { text, replaced }) =
        plan_update(file, &source, reference, &options.syntax)?
    else {
        tracing::debug!(file = %file.display(), "already in sync");
        return Ok(UpdateResult::AlreadySynced {
            file: file.to_path_buf(),
        });
    };

    let text = match options.formatter.as_ref().filter(|f| f.applies_to(file)) {
        Some(formatter) => formatter.format(&text).unwrap_or_else(|err| {
            tracing::debug!(file = %file.display(), error = %err, "formatter failed");
            text
        }),
        None => text,
    };

    atomic_write(file, text.as_bytes()).map_err(|source| SnippetError::io(file, source))?;
    tracing::info!(
        file = %file.display(),
        snippets = replaced.len(),
        "rewrote snippets"
    );

    Ok(UpdateResult::Applied {
        file: file.to_path_buf(),
        replaced,
    })
}
