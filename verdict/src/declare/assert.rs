//! Fatal reporter.
//!
//! Every function stops the test on a miss by panicking with
//! `AssertError: <reason> (<message>)`. The panic is attributed to the
//! caller's line.

use tracing::error;

use super::prelude::*;

#[track_caller]
fn fail(message: &dyn Display, reason: &str) -> ! {
    let location = std::panic::Location::caller();
    error!(%location, %message, reason, "Assertion failed");
    panic!("AssertError: {reason} ({message})");
}

macro_rules! assertions {
    ($(
        $(#[$meta:meta])*
        fn $name:ident [$($gen:tt)*] $(<$($fwd:ident),*>)? ($($arg:ident : $ty:ty),*)
            $(where [$($bound:tt)*])?;
    )*) => {
        $(
            $(#[$meta])*
            #[track_caller]
            pub fn $name<$($gen)*>($($arg: $ty,)* message: impl Display)
            $(where $($bound)*)?
            {
                let (met, reason) = is::$name$(::<$($fwd),*>)?($($arg),*).into_parts();
                if !met {
                    fail(&message, &reason);
                }
            }
        )*
    };
}

for_each_predicate!(assertions);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_return() {
        contains("hello world", "wor", "substring");
        any(&[1, 2, 3], &[2], "overlap");
        not_any(&[1, 2, 3], &[4], "disjoint");
        equal(&"a", &"a", "same");
    }

    #[test]
    #[should_panic(expected = "AssertError: [1,2,3] does not contain [3,2] (order matters)")]
    fn test_contains_miss_panics() {
        contains(&[1, 2, 3], &[3, 2], "order matters");
    }

    #[test]
    #[should_panic(expected = "AssertError: some item from [2] is in [1,2,3] (overlap)")]
    fn test_not_any_miss_panics() {
        not_any(&[1, 2, 3], &[2], "overlap");
    }

    #[test]
    #[should_panic(expected = "AssertError: 5 is not a string or slice (shape)")]
    fn test_usage_error_panics() {
        empty(&5, "shape");
    }
}
