use super::reference::ReferenceSet;
use super::report::SyncReport;
use super::update::update;
use super::{Mode, SyncOptions};
use crate::diff;
use crate::discover::discover;
use crate::error::SnippetError;
use crate::snippet::{parse_file, Snippet};
use std::path::Path;

/// Check `snippets` against `reference`, appending one error per unknown or
/// drifted snippet to `errors`. Returns the number of content mismatches.
pub fn check_snippets(
    reference: &ReferenceSet,
    snippets: &[Snippet],
    errors: &mut Vec<SnippetError>,
) -> usize {
    let mut mismatches = 0;
    for actual in snippets {
        let Some(expected) = reference.get(&actual.name) else {
            errors.push(SnippetError::UnknownSnippet {
                name: actual.name.clone(),
                position: actual.start.clone(),
                reference: reference.source().to_path_buf(),
                suggestion: reference.suggest(&actual.name).map(str::to_string),
            });
            continue;
        };
        if let Some(diff) = diff::render(&actual.code, &expected.code) {
            mismatches += 1;
            errors.push(SnippetError::ContentMismatch {
                name: actual.name.clone(),
                actual: actual.start.clone(),
                expected: expected.start.clone(),
                diff,
            });
        }
    }
    mismatches
}

/// Compare every file reachable from `paths` against the reference.
///
/// Fails outright when the reference cannot be loaded (including duplicate
/// names) or a path does not exist. Everything else is accumulated in the
/// returned report. In [`Mode::Apply`] each file with a content mismatch is
/// rewritten afterwards.
pub fn compare<P: AsRef<Path>>(
    options: &SyncOptions,
    paths: &[P],
) -> Result<SyncReport, SnippetError> {
    let reference = ReferenceSet::load(&options.reference, &options.syntax, &options.filter)?;
    if reference.is_empty() {
        tracing::warn!(
            reference = %options.reference.display(),
            "reference declares no snippets"
        );
    }
    let files = discover(paths, &options.filter)?;

    let mut report = SyncReport::new(options.mode);
    for file in &files {
        report.files_scanned += 1;
        let snippets = match parse_file(file, &options.syntax) {
            Ok(snippets) => snippets,
            Err(err) => {
                report.errors.push(err);
                continue;
            }
        };
        report.snippets_checked += snippets.len();
        if check_snippets(&reference, &snippets, &mut report.errors) > 0 {
            report.mismatched_files.push(file.clone());
        }
    }

    if options.mode == Mode::Apply {
        for file in &report.mismatched_files {
            match update(file, &reference, options) {
                Ok(result) => report.updates.push(result),
                Err(err) => report.errors.push(err),
            }
        }
    }

    tracing::debug!(
        files = report.files_scanned,
        snippets = report.snippets_checked,
        errors = report.errors.len(),
        "comparison finished"
    );
    Ok(report)
}
