use crate::edit::EditError;
use crate::marker::RecordKind;
use crate::snippet::Position;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Every failure the scanner, assembler and synchronizer can report.
///
/// Structural variants carry the [`Position`] of the offending marker so the
/// message reads `file:line: ...` like a compiler diagnostic.
#[derive(Error, Debug)]
pub enum SnippetError {
    #[error("{position}: snippet name cannot contain whitespace")]
    MalformedMarkerName { position: Position },

    #[error("{position}: expected {expected} marker, found {found} marker for `{name}`")]
    UnbalancedMarker {
        position: Position,
        expected: RecordKind,
        found: RecordKind,
        name: String,
    },

    #[error("{start}: snippet `{start_name}` is closed by `{end_name}` at {end}")]
    NameMismatch {
        start: Position,
        start_name: String,
        end: Position,
        end_name: String,
    },

    #[error("{position}: snippet `{name}` has no end marker")]
    UnterminatedSnippet { position: Position, name: String },

    #[error("{second}: duplicate reference snippet `{name}` (first declared at {first})")]
    DuplicateReferenceName {
        name: String,
        first: Position,
        second: Position,
    },

    #[error(
        "{position}: snippet `{name}` is not declared in reference {}{}",
        .reference.display(),
        suggestion_suffix(.suggestion)
    )]
    UnknownSnippet {
        name: String,
        position: Position,
        reference: PathBuf,
        suggestion: Option<String>,
    },

    #[error("{actual}: snippet `{name}` differs from reference at {expected}\n{diff}")]
    ContentMismatch {
        name: String,
        actual: Position,
        expected: Position,
        diff: String,
    },

    #[error("{}: carriage return line endings are not supported", .file.display())]
    UnsupportedLineEnding { file: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot rewrite {}: {source}", .file.display())]
    Splice {
        file: PathBuf,
        #[source]
        source: EditError,
    },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean `{name}`?)"),
        None => String::new(),
    }
}

impl SnippetError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        SnippetError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Stable identifier for machine-readable reports.
    pub fn kind(&self) -> &'static str {
        match self {
            SnippetError::MalformedMarkerName { .. } => "malformed-marker-name",
            SnippetError::UnbalancedMarker { .. } => "unbalanced-marker",
            SnippetError::NameMismatch { .. } => "name-mismatch",
            SnippetError::UnterminatedSnippet { .. } => "unterminated-snippet",
            SnippetError::DuplicateReferenceName { .. } => "duplicate-reference-name",
            SnippetError::UnknownSnippet { .. } => "unknown-snippet",
            SnippetError::ContentMismatch { .. } => "content-mismatch",
            SnippetError::UnsupportedLineEnding { .. } => "unsupported-line-ending",
            SnippetError::Io { .. } => "io",
            SnippetError::Splice { .. } => "splice",
        }
    }

    /// The marker this error is attributed to, when there is one.
    pub fn position(&self) -> Option<&Position> {
        match self {
            SnippetError::MalformedMarkerName { position }
            | SnippetError::UnbalancedMarker { position, .. }
            | SnippetError::UnterminatedSnippet { position, .. }
            | SnippetError::UnknownSnippet { position, .. } => Some(position),
            SnippetError::NameMismatch { start, .. } => Some(start),
            SnippetError::DuplicateReferenceName { second, .. } => Some(second),
            SnippetError::ContentMismatch { actual, .. } => Some(actual),
            SnippetError::UnsupportedLineEnding { .. }
            | SnippetError::Io { .. }
            | SnippetError::Splice { .. } => None,
        }
    }

    /// The other marker an error is attributed to: the end marker of a name
    /// mismatch, the first declaration of a duplicate, the reference copy of
    /// a drifted snippet.
    pub fn related_position(&self) -> Option<&Position> {
        match self {
            SnippetError::NameMismatch { end, .. } => Some(end),
            SnippetError::DuplicateReferenceName { first, .. } => Some(first),
            SnippetError::ContentMismatch { expected, .. } => Some(expected),
            _ => None,
        }
    }

    /// The file this error belongs to.
    pub fn file(&self) -> Option<&Path> {
        match self {
            SnippetError::UnsupportedLineEnding { file } | SnippetError::Splice { file, .. } => {
                Some(file)
            }
            SnippetError::Io { path, .. } => Some(path),
            other => other.position().map(|p| p.file.as_path()),
        }
    }

    /// Structural errors abort parsing of a single file.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SnippetError::MalformedMarkerName { .. }
                | SnippetError::UnbalancedMarker { .. }
                | SnippetError::NameMismatch { .. }
                | SnippetError::UnterminatedSnippet { .. }
                | SnippetError::UnsupportedLineEnding { .. }
        )
    }
}

/// An accumulated list of errors, flattened into one message when displayed.
#[derive(Debug, Default)]
pub struct SnippetErrors(Vec<SnippetError>);

impl SnippetErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: SnippetError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(())` when nothing was accumulated.
    pub fn into_result(self) -> Result<(), SnippetErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<SnippetError>> for SnippetErrors {
    fn from(errors: Vec<SnippetError>) -> Self {
        SnippetErrors(errors)
    }
}

impl fmt::Display for SnippetErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SnippetErrors {}
