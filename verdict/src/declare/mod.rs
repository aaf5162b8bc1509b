//! Reporter bindings for every predicate.
//!
//! One table lists each predicate's signature. It is expanded three times:
//! into the callback forms in [`crate::unless`], the non-fatal
//! [`Expectations`] methods and the fatal [`assert`] functions. A predicate
//! added to the table appears in all three.
//!
//! Table entries read
//! `fn name [generic params] <forwarded type args>? (args) where [bounds]?;`.
//! Forwarded type args are passed to the query form as a turbofish; they are
//! needed where a type parameter does not appear in any argument.

/// Invoke `$emit!` with the full predicate table.
macro_rules! for_each_predicate {
    ($emit:ident) => {
        $emit! {
            /// `haystack` contains `needle` as a substring or contiguous run.
            fn contains[H: Serialize + ?Sized, N: Serialize + ?Sized](haystack: &H, needle: &N);
            fn not_contains[H: Serialize + ?Sized, N: Serialize + ?Sized](haystack: &H, needle: &N);
            /// Some item from `candidates` is in `haystack`.
            fn any[H: Serialize + ?Sized, C: Serialize + ?Sized](haystack: &H, candidates: &C);
            fn not_any[H: Serialize + ?Sized, C: Serialize + ?Sized](haystack: &H, candidates: &C);
            fn empty[T: Serialize + ?Sized](value: &T);
            fn not_empty[T: Serialize + ?Sized](value: &T);
            fn longer_than[T: Serialize + ?Sized](value: &T, n: usize);
            fn shorter_than[T: Serialize + ?Sized](value: &T, n: usize);
            /// a == b
            fn equal[A: PartialEq<B> + Debug + ?Sized, B: Debug + ?Sized](a: &A, b: &B);
            fn not_equal[A: PartialEq<B> + Debug + ?Sized, B: Debug + ?Sized](a: &A, b: &B);
            fn truthy[](a: bool);
            fn falsy[](a: bool);
            fn none[T: Debug](value: &Option<T>);
            fn some[T](value: &Option<T>);
            fn ok[T, E: Display](result: &Result<T, E>);
            fn err[T, E](result: &Result<T, E>);
            fn err_contains[T, E: Display](result: &Result<T, E>, text: &str);
            fn not_err_contains[T, E: Display](result: &Result<T, E>, text: &str);
            /// The error has concrete type `Target`.
            fn err_type[Target: Error + 'static]<Target>(result: &Result<impl Sized, impl Error + 'static>);
            fn not_err_type[Target: Error + 'static]<Target>(result: &Result<impl Sized, impl Error + 'static>);
            fn greater_than[T: PartialOrd + Debug](a: T, b: T);
            fn greater_than_or_equal[T: PartialOrd + Debug](a: T, b: T);
            fn less_than[T: PartialOrd + Debug](a: T, b: T);
            fn less_than_or_equal[T: PartialOrd + Debug](a: T, b: T);
            fn matches[](text: &str, pattern: &str);
            fn not_matches[](text: &str, pattern: &str);
            fn of_type[T: Any]<T>(value: &(impl Any + Debug));
            fn not_of_type[T: Any]<T>(value: &(impl Any + Debug));
            fn zero[T: Default + PartialEq + Debug](value: &T);
            fn not_zero[T: Default + PartialEq + Debug](value: &T);
            fn path_exists[](path: impl AsRef<Path>);
            fn not_path_exists[](path: impl AsRef<Path>);
            fn dir_exists[](path: impl AsRef<Path>);
            fn not_dir_exists[](path: impl AsRef<Path>);
            fn file_exists[](path: impl AsRef<Path>);
            fn not_file_exists[](path: impl AsRef<Path>);
            fn file_contains[](path: impl AsRef<Path>, text: &str);
            fn not_file_contains[](path: impl AsRef<Path>, text: &str);
            fn time_after[Tz1: TimeZone, Tz2: TimeZone](t1: &DateTime<Tz1>, t2: &DateTime<Tz2>)
                where [Tz1::Offset: Display, Tz2::Offset: Display];
            fn time_before[Tz1: TimeZone, Tz2: TimeZone](t1: &DateTime<Tz1>, t2: &DateTime<Tz2>)
                where [Tz1::Offset: Display, Tz2::Offset: Display];
            /// `t1` and `t2` are at most `within` apart.
            fn time_within[Tz1: TimeZone, Tz2: TimeZone](t1: &DateTime<Tz1>, t2: &DateTime<Tz2>, within: Duration)
                where [Tz1::Offset: Display, Tz2::Offset: Display];
            fn not_time_within[Tz1: TimeZone, Tz2: TimeZone](t1: &DateTime<Tz1>, t2: &DateTime<Tz2>, within: Duration)
                where [Tz1::Offset: Display, Tz2::Offset: Display];
            fn exit_code[](status: &Status, expected: i32);
            fn non_zero_exit[](status: &Status);
            fn run_error[](status: &Status);
            fn run_no_error[](status: &Status);
            fn stdout_contains[](status: &Status, text: &str);
            fn not_stdout_contains[](status: &Status, text: &str);
            fn stderr_contains[](status: &Status, text: &str);
            fn not_stderr_contains[](status: &Status, text: &str);
            fn stdout_matches[](status: &Status, pattern: &Regex);
            fn not_stdout_matches[](status: &Status, pattern: &Regex);
            fn stderr_matches[](status: &Status, pattern: &Regex);
            fn not_stderr_matches[](status: &Status, pattern: &Regex);
        }
    };
}

pub(crate) use for_each_predicate;

/// Names the table's signatures refer to. Each expansion site glob-imports
/// this module.
pub(crate) mod prelude {
    pub use std::any::Any;
    pub use std::error::Error;
    pub use std::fmt::{Debug, Display};
    pub use std::path::Path;
    pub use std::time::Duration;

    pub use chrono::{DateTime, TimeZone};
    pub use regex::Regex;
    pub use serde::Serialize;

    pub use crate::is;
    pub use crate::run::Status;
}

pub mod assert;
mod expect;

pub use expect::{Expectations, Failure};
