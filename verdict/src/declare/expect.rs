use std::fmt;
use std::panic::Location;
use std::sync::{Mutex, PoisonError};
use std::thread;

use tracing::warn;

use super::prelude::*;

/// One recorded expectation miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub reason: String,
    /// `file:line:column` of the failing call.
    pub location: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\nExpectFailed: {}", self.message, self.reason)
    }
}

/// Non-fatal reporter.
///
/// Each predicate method records a [`Failure`] on a miss and returns whether
/// the condition held, so a test keeps going and can collect several
/// failures. The test fails when [`Expectations::finish`] is called, or when
/// the value is dropped, if anything was recorded.
///
/// ```ignore
/// let expect = Expectations::new();
/// expect.equal(&status.exit_code, &0, "clean exit");
/// expect.stdout_contains(&status, "done", "completion banner");
/// expect.finish();
/// ```
#[derive(Debug, Default)]
pub struct Expectations {
    failures: Mutex<Vec<Failure>>,
}

impl Expectations {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, location: &Location<'_>, message: &dyn Display, reason: &str) {
        let failure = Failure {
            message: message.to_string(),
            reason: reason.to_string(),
            location: location.to_string(),
        };
        warn!(
            location = %failure.location,
            message = %failure.message,
            reason = %failure.reason,
            "Expectation failed"
        );
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(failure);
    }

    /// Snapshot of the failures recorded so far.
    pub fn failures(&self) -> Vec<Failure> {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_clean(&self) -> bool {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    fn take_failures(&self) -> Vec<Failure> {
        std::mem::take(&mut *self.failures.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Fail the test if any expectation missed.
    ///
    /// # Panics
    ///
    /// Panics with every recorded failure.
    #[track_caller]
    pub fn finish(self) {
        let failures = self.take_failures();
        if !failures.is_empty() {
            panic!("{}", summary(&failures));
        }
    }
}

impl Drop for Expectations {
    fn drop(&mut self) {
        if thread::panicking() {
            return;
        }
        let failures = self.take_failures();
        if !failures.is_empty() {
            panic!("{}", summary(&failures));
        }
    }
}

fn summary(failures: &[Failure]) -> String {
    let mut out = format!("{} expectation(s) failed", failures.len());
    for failure in failures {
        out.push_str(&format!("\n\n{}\n{failure}", failure.location));
    }
    out
}

macro_rules! expectation_methods {
    ($(
        $(#[$meta:meta])*
        fn $name:ident [$($gen:tt)*] $(<$($fwd:ident),*>)? ($($arg:ident : $ty:ty),*)
            $(where [$($bound:tt)*])?;
    )*) => {
        impl Expectations {
            $(
                $(#[$meta])*
                #[track_caller]
                pub fn $name<$($gen)*>(&self, $($arg: $ty,)* message: impl Display) -> bool
                $(where $($bound)*)?
                {
                    let location = Location::caller();
                    is::$name$(::<$($fwd),*>)?($($arg),*)
                        .unless(|reason| self.record(location, &message, reason))
                }
            )*
        }
    };
}

for_each_predicate!(expectation_methods);

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn panic_text(payload: Box<dyn std::any::Any + Send>) -> String {
        match payload.downcast::<String>() {
            Ok(text) => *text,
            Err(payload) => payload
                .downcast::<&str>()
                .map(|text| text.to_string())
                .unwrap_or_default(),
        }
    }

    #[test]
    fn test_hits_record_nothing() {
        let expect = Expectations::new();
        assert!(expect.contains("hello world", "wor", "substring"));
        assert!(expect.truthy(true, "flag"));
        assert!(expect.is_clean());
        expect.finish();
    }

    #[test]
    fn test_misses_are_recorded_and_control_returns() {
        let expect = Expectations::new();
        assert!(!expect.contains("hello", "xyz", "greeting"));
        assert!(!expect.any(&[1, 2, 3], &[4], "overlap"));

        let failures = expect.take_failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].message, "greeting");
        assert_eq!(failures[0].reason, r#""hello" does not contain "xyz""#);
        assert_eq!(
            failures[1].to_string(),
            "overlap\nExpectFailed: no item from [4] is in [1,2,3]"
        );
        assert!(failures[0].location.contains("expect.rs"));
    }

    #[test]
    fn test_finish_panics_with_all_failures() {
        let expect = Expectations::new();
        expect.equal(&1, &2, "first");
        expect.not_zero(&0, "second");

        let payload = catch_unwind(AssertUnwindSafe(|| expect.finish())).unwrap_err();
        let text = panic_text(payload);
        assert!(text.starts_with("2 expectation(s) failed"));
        assert!(text.contains("first\nExpectFailed: 1 != 2"));
        assert!(text.contains("second\nExpectFailed: 0 is zero"));
    }

    #[test]
    fn test_drop_reports_unfinished_failures() {
        let outcome = catch_unwind(|| {
            let expect = Expectations::new();
            expect.falsy(true, "dropped");
        });
        assert!(panic_text(outcome.unwrap_err()).contains("dropped\nExpectFailed: true != false"));
    }

    #[test]
    fn test_shared_across_scoped_threads() {
        let expect = Expectations::new();
        thread::scope(|scope| {
            for n in 0..4 {
                let expect = &expect;
                scope.spawn(move || expect.less_than(n, 2, format!("worker {n}")));
            }
        });
        let mut messages: Vec<String> = expect
            .take_failures()
            .into_iter()
            .map(|failure| failure.message)
            .collect();
        messages.sort();
        assert_eq!(messages, vec!["worker 2", "worker 3"]);
    }
}
