//! The result of evaluating a predicate.

use crate::errors::UsageError;

/// Whether a predicate's condition held, and why not when it did not.
///
/// The reason is empty exactly when the condition was met. A usage error is
/// reported through the same reason channel as an ordinary miss, but stays
/// distinguishable through [`Verdict::is_usage_error`] and
/// [`Verdict::into_result`].
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The condition held.
    Met,
    /// The condition did not hold.
    Missed { reason: String },
    /// The arguments could not be evaluated at all.
    Unusable(UsageError),
}

impl Verdict {
    /// The condition held.
    pub fn met() -> Self {
        Self::Met
    }

    /// The condition did not hold, for the given reason.
    pub fn missed(reason: impl Into<String>) -> Self {
        Self::Missed {
            reason: reason.into(),
        }
    }

    /// Met when `condition` holds, otherwise missed with a lazily built reason.
    pub fn check(condition: bool, reason: impl FnOnce() -> String) -> Self {
        if condition {
            Self::Met
        } else {
            Self::missed(reason())
        }
    }

    pub fn is_met(&self) -> bool {
        matches!(self, Self::Met)
    }

    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::Unusable(_))
    }

    /// Human-readable reason; empty when the condition held.
    pub fn reason(&self) -> String {
        match self {
            Self::Met => String::new(),
            Self::Missed { reason } => reason.clone(),
            Self::Unusable(err) => err.to_string(),
        }
    }

    /// The `(matched, reason)` pair.
    pub fn into_parts(self) -> (bool, String) {
        match self {
            Self::Met => (true, String::new()),
            Self::Missed { reason } => (false, reason),
            Self::Unusable(err) => (false, err.to_string()),
        }
    }

    /// Split usage errors from ordinary misses.
    pub fn into_result(self) -> Result<bool, UsageError> {
        match self {
            Self::Met => Ok(true),
            Self::Missed { .. } => Ok(false),
            Self::Unusable(err) => Err(err),
        }
    }

    /// Invert the condition.
    ///
    /// A met verdict becomes a miss described by `reason`, which must state
    /// what was unexpectedly found. Usage errors stay usage errors.
    pub fn negate(self, reason: impl FnOnce() -> String) -> Self {
        match self {
            Self::Met => Self::missed(reason()),
            Self::Missed { .. } => Self::Met,
            unusable @ Self::Unusable(_) => unusable,
        }
    }

    /// Callback form: call `on_miss` with the reason iff the condition did not
    /// hold, and return whether it held.
    ///
    /// `on_miss` may diverge (a fatal reporter panics); nothing runs after it.
    pub fn unless<F>(self, on_miss: F) -> bool
    where
        F: FnOnce(&str),
    {
        match self {
            Self::Met => true,
            miss => {
                let (_, reason) = miss.into_parts();
                on_miss(&reason);
                false
            }
        }
    }
}

impl From<UsageError> for Verdict {
    fn from(err: UsageError) -> Self {
        Self::Unusable(err)
    }
}
