//! Error types for verdict.
//!
//! Predicates never raise: a usage error travels inside a [`crate::Verdict`] so
//! that its reason text lines up with ordinary misses. Process capture and
//! fixture setup are harness operations and return these errors through
//! `Result`.

use std::path::PathBuf;
use std::time::Duration;

/// A predicate was handed arguments it cannot evaluate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// The value is neither text nor an ordered sequence.
    #[error("{repr} is not a string or slice")]
    NotTextOrSequence { repr: String },

    /// The value could not be captured for inspection.
    #[error("value cannot be inspected: {message}")]
    Unrepresentable { message: String },

    /// A regular expression failed to compile.
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl UsageError {
    pub(crate) fn invalid_pattern(pattern: &str, err: &regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}

/// Errors raised while running a process for capture.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Process failed to start: {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for {program} after {elapsed:?}: {source}")]
    Wait {
        program: String,
        elapsed: Duration,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while building a filesystem fixture.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),

    #[error("Failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Fixture path escapes the fixture root: {0}")]
    OutsideRoot(PathBuf),
}

/// Result type for fixture operations
pub type FixtureResult<T> = Result<T, FixtureError>;
