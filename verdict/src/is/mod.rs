//! Query-form predicates.
//!
//! Each function reports whether a named condition holds as a [`Verdict`],
//! with a human-readable reason when it does not. They are pure apart from
//! the filesystem predicates, which stat or read a single path.
//!
//! Every predicate has a negation with its own positively phrased reason:
//! `not_contains` says what was found rather than echoing `contains`.

mod fs;
mod status;
mod time;

use std::any::{Any, TypeId, type_name};
use std::error::Error;
use std::fmt::{Debug, Display};

use regex::Regex;
use serde::Serialize;

use crate::errors::UsageError;
use crate::outcome::Verdict;
use crate::shape::Opaque;

pub use crate::containment::{any, contains, not_any, not_contains};
pub use fs::{
    dir_exists, file_contains, file_exists, not_dir_exists, not_file_contains, not_file_exists,
    not_path_exists, path_exists,
};
pub use status::{
    exit_code, non_zero_exit, not_stderr_contains, not_stderr_matches, not_stdout_contains,
    not_stdout_matches, run_error, run_no_error, stderr_contains, stderr_matches, stdout_contains,
    stdout_matches,
};
pub use time::{not_time_within, time_after, time_before, time_within};

/// Capture a text or sequence value with its length.
fn measured<T>(value: &T) -> Result<(Opaque, usize), UsageError>
where
    T: Serialize + ?Sized,
{
    let opaque = Opaque::capture_shaped(value)?;
    let len = opaque.shape().len().unwrap_or_default();
    Ok((opaque, len))
}

/// The string or sequence is empty.
pub fn empty<T>(value: &T) -> Verdict
where
    T: Serialize + ?Sized,
{
    match measured(value) {
        Ok((opaque, len)) => Verdict::check(len == 0, || format!("{opaque} is not empty")),
        Err(err) => err.into(),
    }
}

pub fn not_empty<T>(value: &T) -> Verdict
where
    T: Serialize + ?Sized,
{
    match measured(value) {
        Ok((opaque, len)) => Verdict::check(len != 0, || format!("{opaque} is empty")),
        Err(err) => err.into(),
    }
}

/// The length of the string (in bytes) or sequence is greater than `n`.
pub fn longer_than<T>(value: &T, n: usize) -> Verdict
where
    T: Serialize + ?Sized,
{
    match measured(value) {
        Ok((opaque, len)) => Verdict::check(len > n, || format!("{opaque} is not longer than {n}")),
        Err(err) => err.into(),
    }
}

/// The length of the string (in bytes) or sequence is less than `n`.
pub fn shorter_than<T>(value: &T, n: usize) -> Verdict
where
    T: Serialize + ?Sized,
{
    match measured(value) {
        Ok((opaque, len)) => {
            Verdict::check(len < n, || format!("{opaque} is not shorter than {n}"))
        }
        Err(err) => err.into(),
    }
}

/// a == b
pub fn equal<A, B>(a: &A, b: &B) -> Verdict
where
    A: PartialEq<B> + Debug + ?Sized,
    B: Debug + ?Sized,
{
    Verdict::check(a == b, || format!("{a:?} != {b:?}"))
}

/// a != b
pub fn not_equal<A, B>(a: &A, b: &B) -> Verdict
where
    A: PartialEq<B> + Debug + ?Sized,
    B: Debug + ?Sized,
{
    Verdict::check(a != b, || format!("{a:?} == {b:?}"))
}

pub fn truthy(a: bool) -> Verdict {
    Verdict::check(a, || "false != true".to_string())
}

pub fn falsy(a: bool) -> Verdict {
    Verdict::check(!a, || "true != false".to_string())
}

pub fn none<T: Debug>(value: &Option<T>) -> Verdict {
    Verdict::check(value.is_none(), || format!("{value:?} != None"))
}

pub fn some<T>(value: &Option<T>) -> Verdict {
    Verdict::check(value.is_some(), || "expected Some, found None".to_string())
}

/// The result holds no error.
pub fn ok<T, E: Display>(result: &Result<T, E>) -> Verdict {
    match result {
        Ok(_) => Verdict::met(),
        Err(err) => Verdict::missed(format!("error occurred: {err}")),
    }
}

/// The result holds an error.
pub fn err<T, E>(result: &Result<T, E>) -> Verdict {
    Verdict::check(result.is_err(), || "no error occurred".to_string())
}

/// The result holds an error whose message contains `text`.
pub fn err_contains<T, E: Display>(result: &Result<T, E>, text: &str) -> Verdict {
    let found = matches!(result, Err(err) if err.to_string().contains(text));
    Verdict::check(found, || format!("error does not contain {text:?}"))
}

pub fn not_err_contains<T, E: Display>(result: &Result<T, E>, text: &str) -> Verdict {
    let found = matches!(result, Err(err) if err.to_string().contains(text));
    Verdict::check(!found, || format!("error contains {text:?}"))
}

fn err_is<Target, E>(result: &Result<impl Sized, E>) -> bool
where
    Target: Error + 'static,
    E: Error + 'static,
{
    match result {
        Ok(_) => false,
        Err(err) => {
            let err: &(dyn Error + 'static) = err;
            err.is::<Target>()
        }
    }
}

/// The result holds an error of concrete type `Target`.
pub fn err_type<Target>(result: &Result<impl Sized, impl Error + 'static>) -> Verdict
where
    Target: Error + 'static,
{
    Verdict::check(err_is::<Target, _>(result), || {
        format!("error is not of type {}", type_name::<Target>())
    })
}

pub fn not_err_type<Target>(result: &Result<impl Sized, impl Error + 'static>) -> Verdict
where
    Target: Error + 'static,
{
    Verdict::check(!err_is::<Target, _>(result), || {
        format!("error is of type {}", type_name::<Target>())
    })
}

/// a > b
pub fn greater_than<T: PartialOrd + Debug>(a: T, b: T) -> Verdict {
    Verdict::check(a > b, || format!("{a:?} is not greater than {b:?}"))
}

/// a >= b
pub fn greater_than_or_equal<T: PartialOrd + Debug>(a: T, b: T) -> Verdict {
    Verdict::check(a >= b, || {
        format!("{a:?} is not greater than or equal to {b:?}")
    })
}

/// a < b
pub fn less_than<T: PartialOrd + Debug>(a: T, b: T) -> Verdict {
    Verdict::check(a < b, || format!("{a:?} is not less than {b:?}"))
}

/// a <= b
pub fn less_than_or_equal<T: PartialOrd + Debug>(a: T, b: T) -> Verdict {
    Verdict::check(a <= b, || format!("{a:?} is not less than or equal to {b:?}"))
}

fn compile(pattern: &str) -> Result<Regex, UsageError> {
    Regex::new(pattern).map_err(|err| UsageError::invalid_pattern(pattern, &err))
}

/// `text` matches the regular expression `pattern` anywhere.
pub fn matches(text: &str, pattern: &str) -> Verdict {
    match compile(pattern) {
        Ok(regex) => Verdict::check(regex.is_match(text), || {
            format!("{text:?} does not match pattern {pattern:?}")
        }),
        Err(err) => err.into(),
    }
}

pub fn not_matches(text: &str, pattern: &str) -> Verdict {
    match compile(pattern) {
        Ok(regex) => Verdict::check(!regex.is_match(text), || {
            format!("{text:?} matches pattern {pattern:?}")
        }),
        Err(err) => err.into(),
    }
}

/// `value` has concrete type `T`.
pub fn of_type<T: Any>(value: &(impl Any + Debug)) -> Verdict {
    Verdict::check(Any::type_id(value) == TypeId::of::<T>(), || {
        format!("{value:?} is not of type {}", type_name::<T>())
    })
}

pub fn not_of_type<T: Any>(value: &(impl Any + Debug)) -> Verdict {
    Verdict::check(Any::type_id(value) != TypeId::of::<T>(), || {
        format!("{value:?} is of type {}", type_name::<T>())
    })
}

/// `value` equals its type's default.
pub fn zero<T: Default + PartialEq + Debug>(value: &T) -> Verdict {
    Verdict::check(*value == T::default(), || format!("{value:?} is not zero"))
}

pub fn not_zero<T: Default + PartialEq + Debug>(value: &T) -> Verdict {
    Verdict::check(*value != T::default(), || format!("{value:?} is zero"))
}
