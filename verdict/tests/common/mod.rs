#![allow(dead_code)]

pub mod logging;

/// Naive reference for contiguous-run containment.
pub fn has_window<T: PartialEq>(haystack: &[T], needle: &[T]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

/// Naive reference for the existential "any" check.
pub fn shares_item<T: PartialEq>(haystack: &[T], candidates: &[T]) -> bool {
    candidates.iter().any(|c| haystack.iter().any(|h| h == c))
}
