//! Failure message formatting.
//!
//! Multi-line values are indented with `  ~ ` so expected and found text line
//! up in test output. These helpers only shape presentation; they never decide
//! whether a condition holds.

use std::fmt::Debug;

use regex::Regex;

const INDENT: &str = "  ~ ";

/// Prefix every line of `s` with `prefix`.
pub fn prefix(s: &str, prefix: &str) -> String {
    format!("{prefix}{}", s.replace('\n', &format!("\n{prefix}")))
}

/// `noun` must contain `substring`; both are treated as multi-line text.
pub fn must_contain(noun: &str, s: &str, substring: &str) -> String {
    format!(
        "{noun} must contain specific text.\nMust contain:\n{}\nFound:\n{}",
        prefix(substring, INDENT),
        prefix(s, INDENT),
    )
}

pub fn must_not_contain(noun: &str, s: &str, substring: &str) -> String {
    format!(
        "{noun} must not contain specific text.\nMust not contain:\n{}\nFound:\n{}",
        prefix(substring, INDENT),
        prefix(s, INDENT),
    )
}

/// Single-line comparison of an expected and a found value.
pub fn must_equal<E, F>(noun: &str, expected: &E, found: &F) -> String
where
    E: Debug + ?Sized,
    F: Debug + ?Sized,
{
    format!("{noun} must equal {expected:?} but found {found:?}")
}

pub fn must_not_equal<F>(noun: &str, found: &F) -> String
where
    F: Debug + ?Sized,
{
    format!("{noun} must not equal {found:?}")
}

/// Like [`must_contain`] but for a regular expression.
pub fn must_match(noun: &str, pattern: &Regex, found: &str) -> String {
    format!(
        "{noun} must match pattern.\nMust match: {:?}\nFound:\n{}",
        pattern.as_str(),
        prefix(found, INDENT),
    )
}

pub fn must_not_match(noun: &str, pattern: &Regex, found: &str) -> String {
    format!(
        "{noun} must not match pattern.\nMust not match: {:?}\nFound:\n{}",
        pattern.as_str(),
        prefix(found, INDENT),
    )
}

/// Expected and found multi-line text, each block indented.
pub fn unexpected_text(noun: &str, expected: &str, found: &str) -> String {
    format!(
        "Unexpected {noun}. Expected:\n{}\nFound:\n{}",
        prefix(expected, INDENT),
        prefix(found, INDENT),
    )
}

/// Expected and found single-line values.
pub fn unexpected_value<E, F>(noun: &str, expected: &E, found: &F) -> String
where
    E: Debug + ?Sized,
    F: Debug + ?Sized,
{
    format!("Unexpected {noun}. Expected: {expected:?}, Found: {found:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_one_line() {
        assert_eq!(prefix("abc", "#"), "#abc");
    }

    #[test]
    fn test_prefix_multi_line() {
        assert_eq!(prefix("abc\ndef", "#"), "#abc\n#def");
    }

    #[test]
    fn test_prefix_empty() {
        assert_eq!(prefix("", "> "), "> ");
    }

    #[test]
    fn test_unexpected_text() {
        let expected = "Unexpected value. Expected:\n  ~ Expected\nFound:\n  ~ Found";
        assert_eq!(unexpected_text("value", "Expected", "Found"), expected);
    }

    #[test]
    fn test_unexpected_text_multi_line() {
        let expected = "Unexpected value. Expected:\n  ~ Expected\n  ~ Lines\nFound:\n  ~ Found\n  ~ Lines";
        assert_eq!(
            unexpected_text("value", "Expected\nLines", "Found\nLines"),
            expected
        );
    }

    #[test]
    fn test_unexpected_value() {
        assert_eq!(
            unexpected_value("value", "A", "B"),
            r#"Unexpected value. Expected: "A", Found: "B""#
        );
    }

    #[test]
    fn test_must_contain() {
        let found = must_contain("stdout", "line one\nline two", "three");
        assert_eq!(
            found,
            "stdout must contain specific text.\nMust contain:\n  ~ three\nFound:\n  ~ line one\n  ~ line two"
        );
    }

    #[test]
    fn test_must_not_contain() {
        let found = must_not_contain("stderr", "warning", "warn");
        assert!(found.starts_with("stderr must not contain specific text.\nMust not contain:\n  ~ warn"));
        assert!(found.ends_with("Found:\n  ~ warning"));
    }

    #[test]
    fn test_must_equal() {
        assert_eq!(must_equal("reason", "a", "b"), r#"reason must equal "a" but found "b""#);
        assert_eq!(must_equal("code", &1, &2), "code must equal 1 but found 2");
        assert_eq!(must_not_equal("code", &0), "code must not equal 0");
    }

    #[test]
    fn test_must_match() {
        let pattern = Regex::new(r"^ok \d+$").unwrap();
        assert_eq!(
            must_match("stdout", &pattern, "fail"),
            "stdout must match pattern.\nMust match: \"^ok \\\\d+$\"\nFound:\n  ~ fail"
        );
        assert!(must_not_match("stdout", &pattern, "ok 1").contains("Must not match: "));
    }
}
