//! Line-oriented marker scanner.
//!
//! A marker is a single line which, once trimmed and split on whitespace,
//! reads `<prefix> <keyword> <name>`. The keyword is compared
//! case-insensitively, the prefix exactly. Everything else is ordinary text
//! and is never interpreted.

use crate::error::SnippetError;
use crate::snippet::Position;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub const DEFAULT_PREFIX: &str = "//";
pub const DEFAULT_OPEN: &str = "snippet";
pub const DEFAULT_CLOSE: &str = "end";

/// Comment prefix and keywords that make up a marker line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarkerSyntax {
    pub prefix: String,
    pub open: String,
    pub close: String,
}

impl Default for MarkerSyntax {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            open: DEFAULT_OPEN.to_string(),
            close: DEFAULT_CLOSE.to_string(),
        }
    }
}

impl MarkerSyntax {
    pub fn new(
        prefix: impl Into<String>,
        open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            open: open.into(),
            close: close.into(),
        }
    }

    /// Classify a marker keyword, ignoring case.
    fn keyword(&self, field: &str) -> Option<RecordKind> {
        let folded = field.to_lowercase();
        if folded == self.open.to_lowercase() {
            Some(RecordKind::Start)
        } else if folded == self.close.to_lowercase() {
            Some(RecordKind::End)
        } else {
            None
        }
    }

    /// Render the marker line for `kind`, e.g. `// snippet Connect`.
    pub fn marker_line(&self, kind: RecordKind, name: &str) -> String {
        let keyword = match kind {
            RecordKind::Start => &self.open,
            RecordKind::End => &self.close,
        };
        format!("{} {} {}", self.prefix, keyword, name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Start,
    End,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Start => write!(f, "start"),
            RecordKind::End => write!(f, "end"),
        }
    }
}

/// One marker found by [`scan`].
///
/// `line` is a 0-based slice bound into the file's lines: for a start marker
/// it is the first body line, for an end marker it is the marker line itself.
/// A matched pair therefore covers the body `lines[start.line..end.line]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub kind: RecordKind,
    pub line: usize,
    pub name: String,
}

impl Record {
    /// 1-based line number of the marker itself.
    pub fn marker_line(&self) -> usize {
        match self.kind {
            RecordKind::Start => self.line,
            RecordKind::End => self.line + 1,
        }
    }
}

/// Classification of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Marker { kind: RecordKind, name: &'a str },
    /// Prefix and keyword match but the name spans several fields.
    Malformed,
    Text,
}

/// Classify one line.
pub fn classify<'a>(syntax: &MarkerSyntax, line: &'a str) -> LineKind<'a> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 2 || fields[0] != syntax.prefix {
        return LineKind::Text;
    }
    let Some(kind) = syntax.keyword(fields[1]) else {
        return LineKind::Text;
    };
    match fields.len() {
        3 => LineKind::Marker {
            kind,
            name: fields[2],
        },
        n if n > 3 => LineKind::Malformed,
        _ => LineKind::Text,
    }
}

/// Scan every line of `text` into marker records.
///
/// Lines are split on `\n` only; callers reject carriage returns beforehand.
pub fn scan(file: &Path, text: &str, syntax: &MarkerSyntax) -> Result<Vec<Record>, SnippetError> {
    let mut records = Vec::new();
    for (idx, line) in text.split('\n').enumerate() {
        match classify(syntax, line) {
            LineKind::Text => {}
            LineKind::Marker { kind, name } => {
                let line = match kind {
                    RecordKind::Start => idx + 1,
                    RecordKind::End => idx,
                };
                records.push(Record {
                    kind,
                    line,
                    name: name.to_string(),
                });
            }
            LineKind::Malformed => {
                return Err(SnippetError::MalformedMarkerName {
                    position: Position::new(file, idx + 1),
                });
            }
        }
    }
    Ok(records)
}
