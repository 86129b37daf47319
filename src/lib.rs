//! # Tattle
//!
//! Report errors and warnings from deep within a call hierarchy.
//!
//! Code that notices a problem but can keep going reports it to a
//! [`Reporter`] instead of returning early. Reporters wrap other reporters,
//! so a chain can count, capture, print and log the same condition, each
//! layer performing one effect and passing the condition on. Every chain ends
//! in a [root reporter](root()).
//!
//! ## Quick Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tattle::prelude::*;
//!
//! fn check_inputs(reporter: &dyn Reporter, inputs: &[i32]) {
//!     for input in inputs {
//!         if *input < 0 {
//!             reporter.report(&Condition::msg(format!("negative input {}", input)));
//!         } else if *input == 0 {
//!             reporter.report_warning("zero input ignored");
//!         }
//!     }
//! }
//!
//! let capture: Arc<dyn Reporter> = Arc::new(CapturingReporter::new(root()));
//! let reporter: Arc<dyn Reporter> = Arc::new(CountingReporter::new(capture));
//!
//! check_inputs(&*reporter, &[3, -1, 0, -7]);
//!
//! // Later, find the layers we care about without keeping handles to them
//! let counter = find::<CountingReporter>(&reporter).unwrap();
//! assert_eq!((counter.errors(), counter.warnings()), (2, 1));
//!
//! let captured = find::<CapturingReporter>(&reporter).unwrap().list();
//! assert_eq!(captured[0].to_string(), "negative input -1");
//! ```
//!
//! ## Reporters
//!
//! - [`RootReporter`]: does nothing; [`root()`] and [`todo()`] are shared
//!   instances.
//! - [`CountingReporter`]: counts errors and warnings.
//! - [`CapturingReporter`]: keeps reported conditions, optionally bounded.
//! - [`WritingReporter`]: writes `ERROR: ...` / `WARNING: ...` lines to any
//!   [`std::io::Write`].
//! - [`LoggingReporter`]: emits `tracing` events.
//! - [`TeeReporter`]: forwards to a changeable set of reporters.
//!
//! Writing and logging reporters render conditions through [`Formatters`],
//! which can be overridden with templates or functions.
//!
//! ## Warnings
//!
//! A condition is a warning when its cause chain contains a [`Warning`].
//! Use [`Warning::new`], [`Warning::wrap`] or the [`warning!`] macro to build
//! one, and [`is_warning`] to classify any error.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod capturing;
pub mod condition;
pub mod counting;
pub mod format;
pub mod logging;
pub mod lookup;
pub mod reporter;
pub mod root;
pub mod tee;
pub mod testing;
pub mod writing;

#[cfg(feature = "serde")]
mod serde_impl;

// Re-exports
pub use capturing::{CapturingReporter, Overflow};
pub use condition::{is_warning, Chain, Condition, Severity, Warning};
pub use counting::CountingReporter;
pub use format::{format_from_template, FormatFn, Formatters};
pub use logging::LoggingReporter;
pub use lookup::{find, find_as, find_by, walk, Walk};
pub use reporter::{AsAny, Reporter, ReporterExt};
pub use root::{is_root, is_todo, root, todo, RootReporter};
pub use tee::TeeReporter;
pub use writing::WritingReporter;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::capturing::CapturingReporter;
    pub use crate::condition::{is_warning, Condition, Warning};
    pub use crate::counting::CountingReporter;
    pub use crate::format::Formatters;
    pub use crate::logging::LoggingReporter;
    pub use crate::lookup::{find, find_as};
    pub use crate::reporter::{Reporter, ReporterExt};
    pub use crate::root::{root, todo};
    pub use crate::tee::TeeReporter;
    pub use crate::warning;
    pub use crate::writing::WritingReporter;
}
