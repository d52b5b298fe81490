//! snippet-sync: keep code fragments in documentation identical to the code
//!
//! Fragments are delimited by marker comments carrying a name:
//!
//! ```text
//! // snippet Connect
//! let client = Client::connect(addr)?;
//! // end Connect
//! ```
//!
//! One reference location holds the authoritative copy of every fragment.
//! Any other file may embed copies. The tool checks every copy against the
//! reference and, in apply mode, rewrites drifted copies in place.
//!
//! # Architecture
//!
//! - [`marker`] classifies single lines into start/end records.
//! - [`snippet`] pairs records into [`Snippet`]s and validates structure.
//! - [`sync`] compares snippets with a [`ReferenceSet`] and rewrites files.
//! - [`edit`] is the rewrite primitive: ordered line splices and atomic
//!   writes. Everything outside a snippet span is copied byte-for-byte.
//! - [`discover`], [`diff`] and [`format`] walk paths, render diffs for
//!   messages and run the optional formatter.
//!
//! # Example
//!
//! ```no_run
//! use snippet_sync::{compare, Mode, SyncOptions};
//!
//! let options = SyncOptions::new("docs/snippets.rs").with_mode(Mode::Check);
//! let report = compare(&options, &["src"]).expect("reference is valid");
//! for error in &report.errors {
//!     eprintln!("{error}");
//! }
//! ```

pub mod config;
pub mod diff;
pub mod discover;
pub mod edit;
pub mod error;
pub mod extract;
pub mod format;
pub mod logging;
pub mod marker;
pub mod snippet;
pub mod sync;

// Re-exports
pub use config::{load_from_path, load_from_str, Config, ConfigError};
pub use discover::{discover, FileFilter};
pub use edit::{atomic_write, splice_lines, EditError, LineSplice};
pub use error::{SnippetError, SnippetErrors};
pub use extract::{get, Extraction};
pub use format::{FormatError, Formatter};
pub use marker::{MarkerSyntax, Record, RecordKind};
pub use snippet::{parse_file, parse_str, Position, Snippet};
pub use sync::{
    compare, update, Mode, ReferenceSet, ReportEntry, SyncOptions, SyncReport, UpdateResult,
};
