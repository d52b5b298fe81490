//! Comparing snippets against a reference set and rewriting drifted copies.
//!
//! [`compare`] checks every snippet reachable from a path set against the
//! reference. In [`Mode::Apply`] it then calls [`update`] on each file with at
//! least one content mismatch. Both share [`check_snippets`] /
//! [`sync_snippets`] for the per-name comparison.

pub mod compare;
pub mod reference;
pub mod report;
pub mod update;

pub use compare::{check_snippets, compare};
pub use reference::ReferenceSet;
pub use report::{ReportEntry, SyncReport};
pub use update::{plan_update, sync_snippets, update, PlannedUpdate, UpdateResult};

use crate::discover::FileFilter;
use crate::format::Formatter;
use crate::marker::MarkerSyntax;
use serde::Serialize;
use std::path::PathBuf;

/// Default reference location, relative to the working directory.
pub const DEFAULT_REFERENCE: &str = "snippets.rs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Report drift, change nothing
    #[default]
    Check,
    /// Report drift and rewrite mismatched snippets
    Apply,
}

/// Everything a synchronization run needs; there is no global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub reference: PathBuf,
    pub mode: Mode,
    pub syntax: MarkerSyntax,
    pub filter: FileFilter,
    /// Run after each rewrite; `None` disables formatting
    pub formatter: Option<Formatter>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE)
    }
}

impl SyncOptions {
    pub fn new(reference: impl Into<PathBuf>) -> Self {
        Self {
            reference: reference.into(),
            mode: Mode::Check,
            syntax: MarkerSyntax::default(),
            filter: FileFilter::default(),
            formatter: Some(Formatter::rustfmt()),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_syntax(mut self, syntax: MarkerSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_formatter(mut self, formatter: Option<Formatter>) -> Self {
        self.formatter = formatter;
        self
    }
}
