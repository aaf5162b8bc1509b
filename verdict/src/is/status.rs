//! Predicates over a captured [`Status`].

use regex::Regex;

use crate::message;
use crate::outcome::Verdict;
use crate::run::Status;

const STDOUT: &str = "run::Status stdout";
const STDERR: &str = "run::Status stderr";

/// The run exited with exactly `expected`.
pub fn exit_code(status: &Status, expected: i32) -> Verdict {
    Verdict::check(status.exit_code == expected, || {
        format!(
            "run::Status exit code {} != {expected}",
            status.exit_code
        )
    })
}

pub fn non_zero_exit(status: &Status) -> Verdict {
    Verdict::check(status.exit_code != 0, || {
        "run::Status exit code should be non-zero".to_string()
    })
}

/// The entry point returned an error.
pub fn run_error(status: &Status) -> Verdict {
    Verdict::check(status.error.is_some(), || "run::Status has no error".to_string())
}

pub fn run_no_error(status: &Status) -> Verdict {
    match &status.error {
        None => Verdict::met(),
        Some(err) => Verdict::missed(format!("run::Status error: {err}")),
    }
}

fn stream_contains(noun: &str, stream: &str, text: &str) -> Verdict {
    Verdict::check(stream.contains(text), || {
        message::must_contain(noun, stream, text)
    })
}

fn stream_not_contains(noun: &str, stream: &str, text: &str) -> Verdict {
    Verdict::check(!stream.contains(text), || {
        message::must_not_contain(noun, stream, text)
    })
}

fn stream_matches(noun: &str, stream: &str, pattern: &Regex) -> Verdict {
    Verdict::check(pattern.is_match(stream), || {
        message::must_match(noun, pattern, stream)
    })
}

fn stream_not_matches(noun: &str, stream: &str, pattern: &Regex) -> Verdict {
    Verdict::check(!pattern.is_match(stream), || {
        message::must_not_match(noun, pattern, stream)
    })
}

pub fn stdout_contains(status: &Status, text: &str) -> Verdict {
    stream_contains(STDOUT, &status.stdout, text)
}

pub fn not_stdout_contains(status: &Status, text: &str) -> Verdict {
    stream_not_contains(STDOUT, &status.stdout, text)
}

pub fn stderr_contains(status: &Status, text: &str) -> Verdict {
    stream_contains(STDERR, &status.stderr, text)
}

pub fn not_stderr_contains(status: &Status, text: &str) -> Verdict {
    stream_not_contains(STDERR, &status.stderr, text)
}

pub fn stdout_matches(status: &Status, pattern: &Regex) -> Verdict {
    stream_matches(STDOUT, &status.stdout, pattern)
}

pub fn not_stdout_matches(status: &Status, pattern: &Regex) -> Verdict {
    stream_not_matches(STDOUT, &status.stdout, pattern)
}

pub fn stderr_matches(status: &Status, pattern: &Regex) -> Verdict {
    stream_matches(STDERR, &status.stderr, pattern)
}

pub fn not_stderr_matches(status: &Status, pattern: &Regex) -> Verdict {
    stream_not_matches(STDERR, &status.stderr, pattern)
}
