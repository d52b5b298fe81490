//! Unified diffs between snippet bodies, used only in messages.

use similar::TextDiff;

/// Unified diff from `actual` to `expected`, or `None` when they are equal.
pub fn render(actual: &[String], expected: &[String]) -> Option<String> {
    if actual == expected {
        return None;
    }
    let old = join(actual);
    let new = join(expected);
    let diff = TextDiff::from_lines(&old, &new);
    let rendered = diff
        .unified_diff()
        .context_radius(3)
        .header("actual", "reference")
        .to_string();
    Some(rendered)
}

fn join(lines: &[String]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_equal_bodies_have_no_diff() {
        let code = body(&["foo()", "bar()"]);
        assert!(render(&code, &code).is_none());
    }

    #[test]
    fn test_diff_marks_changed_line() {
        let actual = body(&["bar()"]);
        let expected = body(&["foo()"]);
        let diff = render(&actual, &expected).unwrap();
        assert!(diff.contains("--- actual"));
        assert!(diff.contains("+++ reference"));
        assert!(diff.contains("-bar()"));
        assert!(diff.contains("+foo()"));
    }

    #[test]
    fn test_diff_against_empty_body() {
        let diff = render(&[], &body(&["x"])).unwrap();
        assert!(diff.contains("+x"));
    }
}
