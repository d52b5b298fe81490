use super::Project;
use snippet_sync::{compare, MarkerSyntax, Mode, SnippetError, SyncOptions};

const REFERENCE: &str = "\
// snippet Connect
let client = Client::connect(addr)?;
client.ping()?;
// end Connect

// snippet Shutdown
client.shutdown();
// end Shutdown
";

#[test]
fn same_name_twice_in_one_file_is_allowed_and_both_rewritten() {
    let project = Project::new(REFERENCE);
    project.write(
        "src/a.rs",
        "// snippet Connect\nold()\n// end Connect\nmiddle\n// snippet Connect\nolder()\n// end Connect\n",
    );

    let report = compare(&project.options(Mode::Apply), &[project.src()]).unwrap();
    assert_eq!(report.count("content-mismatch"), 2);
    assert_eq!(report.mismatched_files.len(), 1);
    assert_eq!(
        project.read("src/a.rs"),
        "// snippet Connect\nlet client = Client::connect(addr)?;\nclient.ping()?;\n// end Connect\nmiddle\n// snippet Connect\nlet client = Client::connect(addr)?;\nclient.ping()?;\n// end Connect\n"
    );
}

#[test]
fn structural_error_in_one_file_does_not_stop_others() {
    let project = Project::new(REFERENCE);
    project.write("src/a_broken.rs", "// snippet Connect\nx\n// end Shutdown\n");
    project.write("src/b_ok.rs", "// snippet Shutdown\nclient.close();\n// end Shutdown\n");
    project.write("src/c_unterminated.rs", "// snippet Connect\n");

    let report = compare(&project.options(Mode::Apply), &[project.src()]).unwrap();
    assert_eq!(report.files_scanned, 3);
    assert_eq!(report.count("name-mismatch"), 1);
    assert_eq!(report.count("unterminated-snippet"), 1);
    assert_eq!(report.count("content-mismatch"), 1);
    assert_eq!(
        project.read("src/b_ok.rs"),
        "// snippet Shutdown\nclient.shutdown();\n// end Shutdown\n"
    );
    assert_eq!(
        project.read("src/a_broken.rs"),
        "// snippet Connect\nx\n// end Shutdown\n"
    );

    let joined = report.into_result().unwrap_err();
    assert_eq!(joined.len(), 3);
    let message = joined.to_string();
    assert!(message.contains("a_broken.rs:1"));
    assert!(message.contains("b_ok.rs:1"));
    assert!(message.contains("c_unterminated.rs:1"));
}

#[test]
fn surrounding_content_is_untouched() {
    let project = Project::new(REFERENCE);
    let before = "//! Module docs\n\n\tfn helper() {}\n    // snippet Shutdown\n        client.stop();\n    // end Shutdown\n\n\n  trailing   spaces   \n";
    project.write("src/lib.rs", before);

    compare(&project.options(Mode::Apply), &[project.src()]).unwrap();
    let after = project.read("src/lib.rs");
    assert_eq!(
        after,
        "//! Module docs\n\n\tfn helper() {}\n    // snippet Shutdown\n    client.shutdown();\n    // end Shutdown\n\n\n  trailing   spaces   \n"
    );
}

#[test]
fn second_apply_is_a_no_op() {
    let project = Project::new(REFERENCE);
    project.write("src/lib.rs", "// snippet Connect\n// end Connect\n");

    let first = compare(&project.options(Mode::Apply), &[project.src()]).unwrap();
    assert_eq!(first.rewritten().count(), 1);
    let after_first = project.read("src/lib.rs");

    let second = compare(&project.options(Mode::Apply), &[project.src()]).unwrap();
    assert!(second.is_clean());
    assert!(second.updates.is_empty());
    assert_eq!(project.read("src/lib.rs"), after_first);
}

#[test]
fn reference_directory_and_custom_markers() {
    let project = Project::new("");
    project.write("ref/one.py", "# region Greet\nprint('hi')\n# endregion Greet\n");
    project.write("ref/two.py", "# region Bye\nprint('bye')\n# endregion Bye\n");
    project.write(
        "src/doc.md",
        "Usage:\n\n    # region greet\n    print('hello')\n    # endregion greet\n",
    );

    let mut options = SyncOptions::new(project.path().join("ref"))
        .with_mode(Mode::Apply)
        .with_syntax(MarkerSyntax::new("#", "region", "endregion"))
        .with_formatter(None);
    options.filter = options.filter.with_extensions(["py", "md"]);

    let report = compare(&options, &[project.src()]).unwrap();
    assert_eq!(report.count("content-mismatch"), 1);
    assert_eq!(
        project.read("src/doc.md"),
        "Usage:\n\n    # region greet\n    print('hi')\n    # endregion greet\n"
    );
}

#[test]
fn broken_reference_is_fatal() {
    let project = Project::new("// snippet A\n// snippet B\n");
    project.write("src/lib.rs", "");

    let err = compare(&project.options(Mode::Check), &[project.src()]).unwrap_err();
    assert!(matches!(err, SnippetError::UnbalancedMarker { .. }));
}

#[test]
fn missing_actual_path_is_fatal() {
    let project = Project::new(REFERENCE);
    let err = compare(
        &project.options(Mode::Check),
        &[project.path().join("nope")],
    )
    .unwrap_err();
    assert!(matches!(err, SnippetError::Io { .. }));
}

#[test]
fn carriage_returns_are_reported_per_file() {
    let project = Project::new(REFERENCE);
    project.write("src/win.rs", "// snippet Connect\r\nx\r\n// end Connect\r\n");

    let report = compare(&project.options(Mode::Apply), &[project.src()]).unwrap();
    assert_eq!(report.count("unsupported-line-ending"), 1);
    assert!(report.updates.is_empty());
}

fn rustfmt_available() -> bool {
    std::process::Command::new("rustfmt")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

#[test]
fn formatter_only_touches_the_rewritten_file() {
    if !rustfmt_available() {
        return;
    }
    let project = Project::new(REFERENCE);
    let lib = project.write(
        "src/lib.rs",
        "mod child;\nasync fn   f() {\n    // snippet Shutdown\n    old();\n    // end Shutdown\n}\n",
    );
    let child = "pub fn   ugly( ) {   let x=1;   }\n";
    project.write("src/child.rs", child);

    let options = project
        .options(Mode::Apply)
        .with_formatter(Some(snippet_sync::Formatter::rustfmt()));
    let report = compare(&options, &[lib]).unwrap();

    assert_eq!(report.rewritten().count(), 1);
    assert_eq!(
        project.read("src/lib.rs"),
        "mod child;\nasync fn f() {\n    // snippet Shutdown\n    client.shutdown();\n    // end Shutdown\n}\n"
    );
    assert_eq!(project.read("src/child.rs"), child);
}
