//! Snippet assembly: pairing marker records into named code regions.

use crate::error::SnippetError;
use crate::marker::{self, MarkerSyntax, Record, RecordKind};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Location of a marker line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub file: PathBuf,
    /// 1-based line number
    pub line: usize,
}

impl Position {
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// A named code region between a start and an end marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub name: String,
    /// Start marker line
    pub start: Position,
    /// End marker line
    pub end: Position,
    /// Body lines, each trimmed
    pub code: Vec<String>,
}

impl Snippet {
    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        fold_name(&self.name) == fold_name(name)
    }

    /// 0-based line range covering both markers and the body.
    pub fn span(&self) -> Range<usize> {
        self.start.line - 1..self.end.line
    }

    /// Render markers and body as lines, each prefixed with `indent`.
    ///
    /// Blank body lines stay empty so that re-parsing yields the same code.
    pub fn render(&self, syntax: &MarkerSyntax, indent: &str) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.code.len() + 2);
        lines.push(format!(
            "{indent}{}",
            syntax.marker_line(RecordKind::Start, &self.name)
        ));
        for line in &self.code {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{indent}{line}"));
            }
        }
        lines.push(format!(
            "{indent}{}",
            syntax.marker_line(RecordKind::End, &self.name)
        ));
        lines
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.render(&MarkerSyntax::default(), "") {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Case folding used for every snippet name comparison.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Pair scanned records into snippets.
///
/// Checks alternation first, then name agreement, then that the last start
/// marker is closed. The first failure wins.
pub fn assemble(
    file: &Path,
    records: &[Record],
    lines: &[&str],
) -> Result<Vec<Snippet>, SnippetError> {
    for (idx, record) in records.iter().enumerate() {
        let expected = if idx % 2 == 0 {
            RecordKind::Start
        } else {
            RecordKind::End
        };
        if record.kind != expected {
            return Err(SnippetError::UnbalancedMarker {
                position: Position::new(file, record.marker_line()),
                expected,
                found: record.kind,
                name: record.name.clone(),
            });
        }
    }

    for pair in records.chunks_exact(2) {
        let (start, end) = (&pair[0], &pair[1]);
        if fold_name(&start.name) != fold_name(&end.name) {
            return Err(SnippetError::NameMismatch {
                start: Position::new(file, start.marker_line()),
                start_name: start.name.clone(),
                end: Position::new(file, end.marker_line()),
                end_name: end.name.clone(),
            });
        }
    }

    if records.len() % 2 != 0 {
        if let Some(last) = records.last() {
            return Err(SnippetError::UnterminatedSnippet {
                position: Position::new(file, last.marker_line()),
                name: last.name.clone(),
            });
        }
    }

    let snippets = records
        .chunks_exact(2)
        .map(|pair| {
            let (start, end) = (&pair[0], &pair[1]);
            Snippet {
                name: start.name.clone(),
                start: Position::new(file, start.marker_line()),
                end: Position::new(file, end.marker_line()),
                code: lines[start.line..end.line]
                    .iter()
                    .map(|line| line.trim().to_string())
                    .collect(),
            }
        })
        .collect();
    Ok(snippets)
}

/// Reject text that contains a carriage return.
pub fn ensure_unix_newlines(file: &Path, bytes: &[u8]) -> Result<(), SnippetError> {
    if bytes.contains(&b'\r') {
        return Err(SnippetError::UnsupportedLineEnding {
            file: file.to_path_buf(),
        });
    }
    Ok(())
}

/// Parse snippets from in-memory text attributed to `file`.
pub fn parse_str(
    file: &Path,
    text: &str,
    syntax: &MarkerSyntax,
) -> Result<Vec<Snippet>, SnippetError> {
    ensure_unix_newlines(file, text.as_bytes())?;
    let records = marker::scan(file, text, syntax)?;
    if records.is_empty() {
        return Ok(Vec::new());
    }
    let lines: Vec<&str> = text.split('\n').collect();
    assemble(file, &records, &lines)
}

/// Read a source file as UTF-8 text with `\n` line endings.
pub fn read_source(file: &Path) -> Result<String, SnippetError> {
    let bytes = fs::read(file).map_err(|source| SnippetError::io(file, source))?;
    ensure_unix_newlines(file, &bytes)?;
    String::from_utf8(bytes).map_err(|e| {
        SnippetError::io(
            file,
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.utf8_error()),
        )
    })
}

/// Read and parse a single file.
pub fn parse_file(file: &Path, syntax: &MarkerSyntax) -> Result<Vec<Snippet>, SnippetError> {
    let text = read_source(file)?;
    let snippets = parse_str(file, &text, syntax)?;
    tracing::debug!(file = %file.display(), count = snippets.len(), "parsed snippets");
    Ok(snippets)
}
