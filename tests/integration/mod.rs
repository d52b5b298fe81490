//! Scenario tests for the documented check/apply behaviour.

mod apply_mode;
mod scenarios;

use snippet_sync::{Mode, SyncOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch project with a reference file and a `src/` tree.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new(reference: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("snippets.rs"), reference).unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        Self { dir }
    }

    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.dir.path().join(rel)).unwrap()
    }

    pub fn src(&self) -> PathBuf {
        self.dir.path().join("src")
    }

    pub fn options(&self, mode: Mode) -> SyncOptions {
        SyncOptions::new(self.dir.path().join("snippets.rs"))
            .with_mode(mode)
            .with_formatter(None)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
