//! Root reporters
//!
//! A root reporter terminates every chain: it does nothing when a condition is
//! reported and wraps no other reporter. Two process-wide instances exist.
//! [`root()`] is the ordinary anchor, while [`todo()`] marks places where a
//! real reporter has yet to be wired in. They are told apart by identity:
//!
//! ```
//! use tattle::{is_root, is_todo, root, todo};
//!
//! assert!(is_root(&root()));
//! assert!(is_todo(&todo()));
//! assert!(!is_root(&todo()));
//! ```

use std::sync::{Arc, LazyLock};

use crate::condition::Condition;
use crate::reporter::Reporter;

/// The terminal no-op reporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RootReporter;

impl Reporter for RootReporter {
    fn report(&self, _condition: &Condition) {}

    fn children(&self) -> Vec<Arc<dyn Reporter>> {
        Vec::new()
    }

    fn same_as(&self, other: &dyn Reporter) -> bool {
        other.as_any().is::<RootReporter>()
    }
}

static ROOT: LazyLock<Arc<dyn Reporter>> = LazyLock::new(|| Arc::new(RootReporter));
static TODO: LazyLock<Arc<dyn Reporter>> = LazyLock::new(|| Arc::new(RootReporter));

/// The shared root reporter.
pub fn root() -> Arc<dyn Reporter> {
    Arc::clone(&*ROOT)
}

/// The shared placeholder reporter, for code that has no real reporter yet.
pub fn todo() -> Arc<dyn Reporter> {
    Arc::clone(&*TODO)
}

/// Returns true if `reporter` is the instance returned by [`root()`].
pub fn is_root(reporter: &Arc<dyn Reporter>) -> bool {
    Arc::ptr_eq(reporter, &*ROOT)
}

/// Returns true if `reporter` is the instance returned by [`todo()`].
pub fn is_todo(reporter: &Arc<dyn Reporter>) -> bool {
    Arc::ptr_eq(reporter, &*TODO)
}
