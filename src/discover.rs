//! Expanding command-line paths into the list of files to scan.

use crate::error::SnippetError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Which files a directory walk keeps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileFilter {
    /// Accepted extensions, without the leading dot
    pub extensions: Vec<String>,
    /// Directory names never descended into
    pub skip_dirs: Vec<String>,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            extensions: vec!["rs".to_string()],
            skip_dirs: vec![".git".to_string(), "target".to_string()],
        }
    }
}

impl FileFilter {
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn is_skipped(&self, entry: &DirEntry) -> bool {
        // The walk root is never skipped, even if its name is listed
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.skip_dirs.iter().any(|s| s == name))
    }
}

/// Expand `paths` into a file list.
///
/// Files named explicitly are always kept. Directories are walked
/// recursively in file-name order and filtered by `filter`. A path that does
/// not exist fails the whole call.
pub fn discover<P: AsRef<Path>>(
    paths: &[P],
    filter: &FileFilter,
) -> Result<Vec<PathBuf>, SnippetError> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let metadata = path
            .metadata()
            .map_err(|source| SnippetError::io(path, source))?;

        if !metadata.is_dir() {
            if seen.insert(path.to_path_buf()) {
                files.push(path.to_path_buf());
            }
            continue;
        }

        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !filter.is_skipped(entry));
        for entry in walker {
            let entry = entry.map_err(|err| {
                let at = err.path().unwrap_or(path).to_path_buf();
                SnippetError::io(&at, std::io::Error::other(err))
            })?;
            if entry.file_type().is_file() && filter.accepts(entry.path()) {
                let file = entry.into_path();
                if seen.insert(file.clone()) {
                    files.push(file);
                }
            }
        }
    }

    tracing::debug!(count = files.len(), "discovered files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn test_walks_directory_with_filter() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        let b = touch(root, "src/b.rs");
        let a = touch(root, "src/a.rs");
        touch(root, "README.md");
        touch(root, "target/debug/build.rs");
        touch(root, ".git/hooks/x.rs");

        let files = discover(&[root], &FileFilter::default()).unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn test_explicit_file_kept_regardless_of_extension() {
        let temp_dir = tempfile::tempdir().unwrap();
        let readme = touch(temp_dir.path(), "README.md");
        let files = discover(&[&readme], &FileFilter::default()).unwrap();
        assert_eq!(files, vec![readme]);
    }

    #[test]
    fn test_duplicates_dropped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        let a = touch(root, "a.rs");
        let files = discover(&[a.clone(), root.to_path_buf()], &FileFilter::default()).unwrap();
        assert_eq!(files, vec![a]);
    }

    #[test]
    fn test_missing_path_fails() {
        let err = discover(&["no/such/dir"], &FileFilter::default()).unwrap_err();
        assert!(matches!(err, SnippetError::Io { .. }));
    }

    #[test]
    fn test_custom_extensions() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        touch(root, "a.rs");
        let md = touch(root, "guide.md");
        let filter = FileFilter::default().with_extensions(["md"]);
        assert_eq!(discover(&[root], &filter).unwrap(), vec![md]);
    }
}
