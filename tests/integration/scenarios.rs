use super::Project;
use snippet_sync::{compare, parse_str, MarkerSyntax, Mode, SnippetError, UpdateResult};
use std::path::Path;

const REFERENCE: &str = "// snippet A\nfoo()\n// end A\n";

#[test]
fn single_snippet_is_extracted() {
    let snippets = parse_str(
        Path::new("a.rs"),
        "// snippet A\nx := 1\n// end A",
        &MarkerSyntax::default(),
    )
    .unwrap();
    assert_eq!(snippets.len(), 1);
    assert_eq!(snippets[0].name, "A");
    assert_eq!(snippets[0].code, vec!["x := 1"]);
}

#[test]
fn mismatched_end_name_cites_both_markers() {
    let err = parse_str(
        Path::new("a.rs"),
        "// snippet A\nx := 1\n// end B\n",
        &MarkerSyntax::default(),
    )
    .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("a.rs:1"));
    assert!(message.contains("a.rs:3"));
    assert!(matches!(err, SnippetError::NameMismatch { .. }));
}

#[test]
fn check_mode_reports_mismatch_and_leaves_file() {
    let project = Project::new(REFERENCE);
    let original = "fn main() {\n    // snippet A\n    bar()\n    // end A\n}\n";
    project.write("src/main.rs", original);

    let report = compare(&project.options(Mode::Check), &[project.src()]).unwrap();
    assert_eq!(report.errors.len(), 1);
    match &report.errors[0] {
        SnippetError::ContentMismatch {
            name,
            actual,
            expected,
            diff,
        } => {
            assert_eq!(name, "A");
            assert_eq!(actual.line, 2);
            assert_eq!(expected.line, 1);
            assert!(diff.contains("-bar()"));
            assert!(diff.contains("+foo()"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(report.updates.is_empty());
    assert_eq!(project.read("src/main.rs"), original);
}

#[test]
fn apply_mode_rewrites_only_the_block() {
    let project = Project::new(REFERENCE);
    project.write(
        "src/main.rs",
        "// header\nfn main() {\n    // snippet A\n    bar()\n    // end A\n}\n// footer",
    );

    let report = compare(&project.options(Mode::Apply), &[project.src()]).unwrap();
    assert_eq!(report.count("content-mismatch"), 1);
    assert_eq!(report.rewritten().count(), 1);
    assert_eq!(
        project.read("src/main.rs"),
        "// header\nfn main() {\n    // snippet A\n    foo()\n    // end A\n}\n// footer"
    );
}

#[test]
fn unknown_snippet_is_reported_but_others_are_rewritten() {
    let project = Project::new(REFERENCE);
    project.write(
        "src/lib.rs",
        "// snippet Z\nzzz()\n// end Z\n\n// snippet a\nbar()\n// end a\n",
    );

    let report = compare(&project.options(Mode::Apply), &[project.src()]).unwrap();
    assert_eq!(report.count("unknown-snippet"), 1);
    assert_eq!(report.count("content-mismatch"), 1);
    assert_eq!(
        project.read("src/lib.rs"),
        "// snippet Z\nzzz()\n// end Z\n\n// snippet a\nfoo()\n// end a\n"
    );
}

#[test]
fn matching_file_is_not_written() {
    let project = Project::new(REFERENCE);
    let path = project.write("src/lib.rs", "  // Snippet A\n  foo()\n  // END A\n");
    let options = project.options(Mode::Apply);

    let report = compare(&options, &[project.src()]).unwrap();
    assert!(report.is_clean());
    assert!(report.updates.is_empty());

    let reference = snippet_sync::ReferenceSet::load(
        &options.reference,
        &options.syntax,
        &options.filter,
    )
    .unwrap();
    let result = snippet_sync::update(&path, &reference, &options).unwrap();
    assert_eq!(result, UpdateResult::AlreadySynced { file: path });
    assert_eq!(project.read("src/lib.rs"), "  // Snippet A\n  foo()\n  // END A\n");
}

#[test]
fn duplicate_reference_names_abort_before_actuals() {
    let project = Project::new("// snippet X\na\n// end X\n// snippet x\nb\n// end x\n");
    // This actual file is malformed; it must never be looked at.
    project.write("src/broken.rs", "// snippet Q\n");

    let err = compare(&project.options(Mode::Check), &[project.src()]).unwrap_err();
    assert!(matches!(err, SnippetError::DuplicateReferenceName { .. }));
}

#[test]
fn case_insensitive_names_pair_up() {
    let snippets = parse_str(
        Path::new("a.rs"),
        "// snippet Foo\nx\n// end FOO\n",
        &MarkerSyntax::default(),
    )
    .unwrap();
    assert_eq!(snippets.len(), 1);
}
