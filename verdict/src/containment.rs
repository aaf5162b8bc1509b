//! Containment engine: substring, contiguous subsequence and "any element"
//! matching, uniform over text and ordered sequences.
//!
//! The slice-level functions are generic over the element comparison so that
//! natively comparable element types can skip opaque capture entirely. The
//! comparison must be an equivalence relation for the results to be
//! meaningful.

use memchr::memmem;
use serde::Serialize;

use crate::outcome::Verdict;
use crate::shape::{Opaque, Shape};

/// True iff `needle` occurs as a contiguous run in `haystack`.
///
/// Offsets are tried left to right and the first full match wins. An empty
/// needle is contained in every haystack; a needle longer than the haystack
/// is contained in none.
pub fn contains_by<T, U, F>(haystack: &[T], needle: &[U], mut eq: F) -> bool
where
    F: FnMut(&T, &U) -> bool,
{
    if needle.len() > haystack.len() {
        return false;
    }
    (0..=haystack.len() - needle.len()).any(|offset| {
        haystack[offset..offset + needle.len()]
            .iter()
            .zip(needle)
            .all(|(h, n)| eq(h, n))
    })
}

/// True iff some element of `candidates` equals some element of `haystack`.
pub fn any_by<T, U, F>(haystack: &[T], candidates: &[U], mut eq: F) -> bool
where
    F: FnMut(&T, &U) -> bool,
{
    candidates
        .iter()
        .any(|candidate| haystack.iter().any(|item| eq(item, candidate)))
}

fn text_contains(haystack: &str, needle: &str) -> bool {
    memmem::find(haystack.as_bytes(), needle.as_bytes()).is_some()
}

fn opaque_contains(haystack: &Opaque, needle: &Opaque) -> bool {
    match (haystack.shape(), needle.shape()) {
        (Shape::Text(h), Shape::Text(n)) => text_contains(h, n),
        (h, n) => {
            let (h, n) = (h.elements(), n.elements());
            contains_by(&h[..], &n[..], |a, b| a == b)
        }
    }
}

fn opaque_any(haystack: &Opaque, candidates: &Opaque) -> bool {
    match (haystack.shape(), candidates.shape()) {
        (Shape::Text(h), Shape::Text(c)) => text_contains(h, c),
        (h, c) => {
            let (h, c) = (h.elements(), c.elements());
            any_by(&h[..], &c[..], |a, b| a == b)
        }
    }
}

fn capture_pair<H, N>(haystack: &H, needle: &N) -> Result<(Opaque, Opaque), Verdict>
where
    H: Serialize + ?Sized,
    N: Serialize + ?Sized,
{
    let haystack = Opaque::capture_shaped(haystack)?;
    let needle = Opaque::capture_shaped(needle)?;
    Ok((haystack, needle))
}

/// `haystack` contains `needle`: a substring for text, a contiguous run of
/// equal elements for sequences.
pub fn contains<H, N>(haystack: &H, needle: &N) -> Verdict
where
    H: Serialize + ?Sized,
    N: Serialize + ?Sized,
{
    let (haystack, needle) = match capture_pair(haystack, needle) {
        Ok(pair) => pair,
        Err(verdict) => return verdict,
    };
    Verdict::check(opaque_contains(&haystack, &needle), || {
        format!("{haystack} does not contain {needle}")
    })
}

/// `haystack` does not contain `needle`.
pub fn not_contains<H, N>(haystack: &H, needle: &N) -> Verdict
where
    H: Serialize + ?Sized,
    N: Serialize + ?Sized,
{
    let (haystack, needle) = match capture_pair(haystack, needle) {
        Ok(pair) => pair,
        Err(verdict) => return verdict,
    };
    Verdict::check(!opaque_contains(&haystack, &needle), || {
        format!("{haystack} contains {needle}")
    })
}

/// Some item from `candidates` is in `haystack`. On two texts this is plain
/// substring containment of the whole candidate text.
pub fn any<H, C>(haystack: &H, candidates: &C) -> Verdict
where
    H: Serialize + ?Sized,
    C: Serialize + ?Sized,
{
    let (haystack, candidates) = match capture_pair(haystack, candidates) {
        Ok(pair) => pair,
        Err(verdict) => return verdict,
    };
    if let (Shape::Text(_), Shape::Text(_)) = (haystack.shape(), candidates.shape()) {
        return Verdict::check(opaque_any(&haystack, &candidates), || {
            format!("{haystack} does not contain {candidates}")
        });
    }
    Verdict::check(opaque_any(&haystack, &candidates), || {
        format!("no item from {candidates} is in {haystack}")
    })
}

/// No item from `candidates` is in `haystack`.
pub fn not_any<H, C>(haystack: &H, candidates: &C) -> Verdict
where
    H: Serialize + ?Sized,
    C: Serialize + ?Sized,
{
    let (haystack, candidates) = match capture_pair(haystack, candidates) {
        Ok(pair) => pair,
        Err(verdict) => return verdict,
    };
    Verdict::check(!opaque_any(&haystack, &candidates), || {
        format!("some item from {candidates} is in {haystack}")
    })
}
