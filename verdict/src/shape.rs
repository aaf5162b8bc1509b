//! Runtime shape classification for opaque values.
//!
//! Any `Serialize` value can be handed to a shape-polymorphic predicate. It is
//! captured once as a typed [`Captured`] tree and classified as text, an
//! ordered sequence, or neither. Matching algorithms dispatch on that tag only.
//!
//! Strings are text. Slices, vectors, fixed arrays, sets and anonymous tuples
//! are sequences. Everything else is unsupported, including `Option` and
//! named wrappers around a sequence.

use std::borrow::Cow;

use serde::Serialize;

use crate::capture::Captured;
use crate::errors::UsageError;

/// A caller-supplied value captured for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct Opaque(Captured);

impl Opaque {
    /// Capture a value. Fails only when the value's `Serialize` impl fails.
    pub fn capture<T>(value: &T) -> Result<Self, UsageError>
    where
        T: Serialize + ?Sized,
    {
        Captured::of(value)
            .map(Self)
            .map_err(|err| UsageError::Unrepresentable {
                message: err.to_string(),
            })
    }

    pub fn value(&self) -> &Captured {
        &self.0
    }

    pub fn shape(&self) -> Shape<'_> {
        Shape::classify(&self.0)
    }

    /// Capture and require text or sequence shape.
    pub fn capture_shaped<T>(value: &T) -> Result<Self, UsageError>
    where
        T: Serialize + ?Sized,
    {
        let opaque = Self::capture(value)?;
        if matches!(opaque.shape(), Shape::Unsupported) {
            return Err(UsageError::NotTextOrSequence {
                repr: opaque.to_string(),
            });
        }
        Ok(opaque)
    }
}

/// Canonical representation (`"hello"`, `[1,2,3]`, `Some(1)`).
impl std::fmt::Display for Opaque {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The shape of a captured value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    Text(&'a str),
    Sequence(&'a [Captured]),
    Unsupported,
}

impl<'a> Shape<'a> {
    pub fn classify(value: &'a Captured) -> Self {
        match value {
            Captured::Str(text) => Self::Text(text),
            Captured::Seq(items) => Self::Sequence(items),
            _ => Self::Unsupported,
        }
    }

    /// Length in bytes for text, in elements for sequences.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Text(text) => Some(text.len()),
            Self::Sequence(items) => Some(items.len()),
            Self::Unsupported => None,
        }
    }

    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }

    /// The value as a sequence of elements. Text yields its UTF-8 bytes as
    /// `u8` elements, so it compares equal only to a `u8` sequence.
    pub fn elements(&self) -> Cow<'a, [Captured]> {
        match *self {
            Self::Text(text) => Cow::Owned(text.bytes().map(Captured::U8).collect()),
            Self::Sequence(items) => Cow::Borrowed(items),
            Self::Unsupported => Cow::Borrowed(&[]),
        }
    }
}
