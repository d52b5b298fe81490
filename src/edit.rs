use std::io::Write;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

/// The rewrite primitive: replace a range of whole lines.
///
/// A file is held as the immutable sequence produced by splitting on `\n`;
/// splices address that sequence by 0-based line index and the result is
/// joined back with `\n`, so every line outside a splice is reproduced
/// byte-for-byte (including a missing or present trailing newline).
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "LineSplice does nothing until passed to splice_lines()"]
pub struct LineSplice {
    /// Replaced lines, `[start, end)`
    pub lines: Range<usize>,
    /// Lines written in their place
    pub replacement: Vec<String>,
}

impl LineSplice {
    pub fn new(lines: Range<usize>, replacement: Vec<String>) -> Self {
        Self { lines, replacement }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditError {
    #[error("Invalid line range: [{start}, {end}) in text of {len} lines")]
    InvalidLineRange { start: usize, end: usize, len: usize },

    #[error("Overlapping splices: [{first_start}, {first_end}) and [{second_start}, {second_end})")]
    Overlap {
        first_start: usize,
        first_end: usize,
        second_start: usize,
        second_end: usize,
    },
}

/// Apply `splices` to `original` and join the result with `\n`.
///
/// Splices must be sorted by start line and must not overlap.
pub fn splice_lines(original: &[&str], splices: &[LineSplice]) -> Result<String, EditError> {
    for splice in splices {
        let Range { start, end } = splice.lines;
        if start > end || end > original.len() {
            return Err(EditError::InvalidLineRange {
                start,
                end,
                len: original.len(),
            });
        }
    }

    for window in splices.windows(2) {
        let (first, second) = (&window[0].lines, &window[1].lines);
        if first.end > second.start {
            return Err(EditError::Overlap {
                first_start: first.start,
                first_end: first.end,
                second_start: second.start,
                second_end: second.end,
            });
        }
    }

    let added: usize = splices.iter().map(|s| s.replacement.len()).sum();
    let mut out: Vec<&str> = Vec::with_capacity(original.len() + added);
    let mut cursor = 0;
    for splice in splices {
        out.extend_from_slice(&original[cursor..splice.lines.start]);
        out.extend(splice.replacement.iter().map(String::as_str));
        cursor = splice.lines.end;
    }
    out.extend_from_slice(&original[cursor..]);

    Ok(out.join("\n"))
}

/// Leading whitespace of `line`.
pub fn indentation(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full write succeeds or the original file is left as it was.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    // Same directory keeps the rename on one filesystem
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        Some(_) => Path::new("."),
        None => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        }
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;

    // Keep the original permissions
    if let Ok(metadata) = std::fs::metadata(path) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
