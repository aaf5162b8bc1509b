//! Callback-form predicates.
//!
//! Each function takes the same arguments as its [`crate::is`] counterpart
//! plus `on_miss`, which is called exactly once with the reason when the
//! condition does not hold. The return value says whether it held, so a
//! caller can branch and report in one call. `on_miss` may diverge.

use crate::declare::for_each_predicate;
use crate::declare::prelude::*;

macro_rules! callback_forms {
    ($(
        $(#[$meta:meta])*
        fn $name:ident [$($gen:tt)*] $(<$($fwd:ident),*>)? ($($arg:ident : $ty:ty),*)
            $(where [$($bound:tt)*])?;
    )*) => {
        $(
            $(#[$meta])*
            pub fn $name<$($gen)*>($($arg: $ty,)* on_miss: impl FnOnce(&str)) -> bool
            $(where $($bound)*)?
            {
                is::$name$(::<$($fwd),*>)?($($arg),*).unless(on_miss)
            }
        )*
    };
}

for_each_predicate!(callback_forms);

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Collects every reason handed to `on_miss`.
    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl Recorder {
        fn hook(&self) -> impl FnOnce(&str) + '_ {
            |reason: &str| self.0.borrow_mut().push(reason.to_string())
        }

        fn calls(&self) -> Vec<String> {
            self.0.borrow().clone()
        }
    }

    #[test]
    fn test_callback_not_called_on_hit() {
        let recorder = Recorder::default();
        assert!(contains("hello world", "wor", recorder.hook()));
        assert!(any(&[1, 2, 3], &[2], recorder.hook()));
        assert!(equal(&1, &1, recorder.hook()));
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_callback_called_once_on_miss() {
        let recorder = Recorder::default();
        assert!(!contains(&[1, 2, 3], &[3, 2], recorder.hook()));
        assert_eq!(recorder.calls(), vec!["[1,2,3] does not contain [3,2]"]);
    }

    #[test]
    fn test_negated_callback() {
        let recorder = Recorder::default();
        assert!(!not_any(&[1, 2, 3], &[2], recorder.hook()));
        assert!(not_contains("hello", "xyz", recorder.hook()));
        assert_eq!(recorder.calls(), vec!["some item from [2] is in [1,2,3]"]);
    }

    #[test]
    fn test_usage_error_is_a_miss() {
        let recorder = Recorder::default();
        assert!(!contains(&5, "x", recorder.hook()));
        assert!(!not_contains(&5, "x", recorder.hook()));
        assert_eq!(
            recorder.calls(),
            vec!["5 is not a string or slice", "5 is not a string or slice"]
        );
    }

    #[test]
    fn test_forwarded_type_arguments() {
        let recorder = Recorder::default();
        assert!(of_type::<i32>(&1i32, recorder.hook()));
        let failed: Result<(), std::io::Error> = Err(std::io::Error::other("io"));
        assert!(err_type::<std::io::Error>(&failed, recorder.hook()));
        assert!(!not_err_type::<std::io::Error>(&failed, recorder.hook()));
        assert_eq!(recorder.calls().len(), 1);
    }

    #[test]
    fn test_callback_may_diverge() {
        let outcome = std::panic::catch_unwind(|| {
            falsy(true, |reason| panic!("stopped: {reason}"));
            unreachable!("callback diverged");
        });
        assert!(outcome.is_err());
    }
}
