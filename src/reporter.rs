//! The `Reporter` trait shared by every sink
//!
//! A reporter does two things: it performs some effect for each reported
//! [`Condition`], and it hands that condition on to the reporters it wraps.
//! Chaining reporters this way builds a tree whose leaves are
//! [root reporters](crate::root).
//!
//! # Implementing a reporter
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use tattle::{root, Condition, Reporter, ReporterExt};
//!
//! #[derive(Debug)]
//! struct Tripwire {
//!     tripped: AtomicBool,
//!     child: Arc<dyn Reporter>,
//! }
//!
//! impl Reporter for Tripwire {
//!     fn report(&self, condition: &Condition) {
//!         self.tripped.store(true, Ordering::SeqCst);
//!         self.child.report(condition);
//!     }
//!
//!     fn children(&self) -> Vec<Arc<dyn Reporter>> {
//!         vec![self.child.clone()]
//!     }
//! }
//!
//! let wire = Tripwire { tripped: AtomicBool::new(false), child: root() };
//! wire.report_error(std::fmt::Error);
//! assert!(wire.tripped.load(Ordering::SeqCst));
//! ```

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::condition::{Condition, Warning};

/// Upcasting support for [`Reporter`] trait objects.
///
/// Implemented automatically for every `'static + Send + Sync` type; it lets
/// the typed lookup recover a concrete reporter from an `Arc<dyn Reporter>`.
pub trait AsAny: Any + Send + Sync {
    /// View this value as [`Any`].
    fn as_any(&self) -> &dyn Any;

    /// Convert a shared handle to this value into a shared [`Any`] handle.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A sink for reported errors and warnings.
///
/// # Contract
///
/// - [`report`](Reporter::report) performs the reporter's effect and then
///   forwards the condition to every reporter returned by
///   [`children`](Reporter::children). It never fails; a reporter that cannot
///   perform its effect still forwards.
/// - [`children`](Reporter::children) returns the wrapped reporters in order.
///   Only root reporters return an empty list.
pub trait Reporter: AsAny + fmt::Debug {
    /// Report a condition and pass it on to the wrapped reporters.
    fn report(&self, condition: &Condition);

    /// The reporters wrapped by this reporter, possibly empty.
    fn children(&self) -> Vec<Arc<dyn Reporter>>;

    /// Structural equality between reporters.
    ///
    /// Used by [`TeeReporter::remove`](crate::TeeReporter::remove). The
    /// default compares identity; reporters whose state is comparable
    /// override it.
    fn same_as(&self, other: &dyn Reporter) -> bool {
        std::ptr::addr_eq(self as *const Self, other as *const dyn Reporter)
    }
}

/// Compare two lists of reporters element-wise with [`Reporter::same_as`].
pub(crate) fn all_same(left: &[Arc<dyn Reporter>], right: &[Arc<dyn Reporter>]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(l, r)| l.same_as(&**r))
}

/// Convenience methods available on every reporter.
pub trait ReporterExt: Reporter {
    /// Report any error value.
    fn report_error<E>(&self, error: E)
    where
        E: StdError + Send + Sync + 'static,
    {
        self.report(&Condition::new(error));
    }

    /// Report a warning with the given text.
    fn report_warning(&self, text: impl Into<String>) {
        self.report(&Condition::new(Warning::new(text)));
    }
}

impl<R: Reporter + ?Sized> ReporterExt for R {}
