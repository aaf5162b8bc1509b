//! Predicates, reporters and fixtures for test suites.
//!
//! Every predicate comes in several forms built from one definition:
//!
//! - [`is`]: query form, returning a [`Verdict`]
//! - [`unless`]: callback form, calling `on_miss(reason)` on a miss
//! - [`Expectations`]: non-fatal reporter that records misses and keeps going
//! - [`assert`]: fatal reporter that panics on a miss
//!
//! ```ignore
//! use verdict::{Expectations, assert, is};
//!
//! assert!(is::contains(&[1, 2, 3], &[2, 3]).is_met());
//! assert::any(&["a", "b"], &["b"], "shared item");
//!
//! let expect = Expectations::new();
//! expect.contains("hello world", "wor", "greeting");
//! expect.finish();
//! ```
//!
//! Text and sequence predicates accept any `Serialize` value and decide its
//! shape at runtime; see [`shape`].

pub mod capture;
pub mod config;
pub mod containment;
pub mod declare;
pub mod errors;
pub mod is;
pub mod message;
pub mod outcome;
pub mod run;
pub mod shape;
pub mod testing;
pub mod unless;
pub mod with;

pub use capture::Captured;
pub use declare::{Expectations, Failure, assert};
pub use errors::{FixtureError, FixtureResult, RunError, UsageError};
pub use outcome::Verdict;
pub use run::{EntryPoint, Process, Status, Streams};
pub use shape::{Opaque, Shape};
