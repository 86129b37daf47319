//! Testing utilities and helpers for reporters
//!
//! This module provides a recording [`MockReporter`] for code that takes or
//! builds reporter chains, assertion macros for conditions, and (with the
//! `proptest` feature) an [`Arbitrary`](proptest::arbitrary::Arbitrary)
//! implementation for [`Condition`].
//!
//! # Examples
//!
//! ## MockReporter
//!
//! ```rust
//! use std::sync::Arc;
//! use tattle::testing::MockReporter;
//! use tattle::{root, Reporter, ReporterExt};
//!
//! fn load(reporter: &dyn Reporter) {
//!     reporter.report_warning("config file missing, using defaults");
//! }
//!
//! let mock = MockReporter::new().with_children(vec![root()]);
//! load(&mock);
//!
//! assert_eq!(mock.reported().len(), 1);
//! assert_eq!(mock.children().len(), 1);
//! assert_eq!(mock.children_calls(), 1);
//! ```
//!
//! ## Assertion Macros
//!
//! ```rust
//! use tattle::{assert_error, assert_warning, Condition, Warning};
//!
//! assert_warning!(Condition::new(Warning::new("careful")));
//! assert_error!(Condition::msg("boom"));
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::condition::Condition;
use crate::reporter::Reporter;

/// A reporter that records what is reported to it.
///
/// `MockReporter` does not forward reports to its children; the children are
/// only what [`children`](Reporter::children) returns, which lets tests build
/// arbitrary trees for lookup without side effects.
#[derive(Debug, Default)]
pub struct MockReporter {
    reported: Mutex<Vec<Condition>>,
    children: Vec<Arc<dyn Reporter>>,
    children_calls: AtomicUsize,
}

impl MockReporter {
    /// Create a mock with no children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reporters returned by [`children`](Reporter::children).
    pub fn with_children(mut self, children: Vec<Arc<dyn Reporter>>) -> Self {
        self.children = children;
        self
    }

    /// Every condition reported so far, in order.
    pub fn reported(&self) -> Vec<Condition> {
        self.reported
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many times [`children`](Reporter::children) has been called.
    pub fn children_calls(&self) -> usize {
        self.children_calls.load(Ordering::SeqCst)
    }
}

impl Reporter for MockReporter {
    fn report(&self, condition: &Condition) {
        self.reported
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(condition.clone());
    }

    fn children(&self) -> Vec<Arc<dyn Reporter>> {
        self.children_calls.fetch_add(1, Ordering::SeqCst);
        self.children.clone()
    }
}

/// Assert that a condition is classified as a warning.
///
/// # Example
///
/// ```rust
/// use tattle::{assert_warning, Condition, Warning};
///
/// assert_warning!(Condition::new(Warning::new("careful")));
/// ```
#[macro_export]
macro_rules! assert_warning {
    ($condition:expr) => {
        match &$condition {
            condition => {
                if !$crate::Condition::is_warning(condition) {
                    panic!("Expected warning, got error: {}", condition);
                }
            }
        }
    };
}

/// Assert that a condition is classified as an error.
///
/// # Example
///
/// ```rust
/// use tattle::{assert_error, Condition};
///
/// assert_error!(Condition::msg("boom"));
/// ```
#[macro_export]
macro_rules! assert_error {
    ($condition:expr) => {
        match &$condition {
            condition => {
                if $crate::Condition::is_warning(condition) {
                    panic!("Expected error, got warning: {}", condition);
                }
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for Condition {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (any::<bool>(), "[a-z][a-z ]{0,23}")
            .prop_map(|(warning, text)| {
                if warning {
                    Condition::new(crate::condition::Warning::new(text))
                } else {
                    Condition::msg(text)
                }
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Warning;
    use crate::root::root;

    #[test]
    fn mock_records_reports() {
        let mock = MockReporter::new();
        let a = Condition::msg("a");
        let b = Condition::new(Warning::new("b"));

        mock.report(&a);
        mock.report(&b);

        assert_eq!(mock.reported(), vec![a, b]);
    }

    #[test]
    fn mock_children_default_empty() {
        let mock = MockReporter::new();

        assert!(mock.children().is_empty());
        assert_eq!(mock.children_calls(), 1);
    }

    #[test]
    fn mock_with_children() {
        let parent = root();
        let mock = MockReporter::new().with_children(vec![parent.clone()]);

        let children = mock.children();
        assert_eq!(children.len(), 1);
        assert!(Arc::ptr_eq(&children[0], &parent));
    }

    #[test]
    fn assert_warning_macro() {
        assert_warning!(Condition::new(Warning::new("w")));
    }

    #[test]
    fn assert_error_macro() {
        assert_error!(Condition::msg("e"));
    }

    #[test]
    #[should_panic(expected = "Expected warning, got error")]
    fn assert_warning_panics_on_error() {
        assert_warning!(Condition::msg("e"));
    }

    #[test]
    #[should_panic(expected = "Expected error, got warning")]
    fn assert_error_panics_on_warning() {
        assert_error!(Condition::new(Warning::new("w")));
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use super::*;

        proptest! {
            #[test]
            fn condition_arbitrary_generates_both_kinds(condition in any::<Condition>()) {
                match condition.downcast_ref::<Warning>() {
                    Some(_) => prop_assert!(condition.is_warning()),
                    None => prop_assert!(!condition.is_warning()),
                }
            }
        }
    }
}
